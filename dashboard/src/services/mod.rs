//! Service implementations
//!
//! Real implementations of the dashboard's service traits

pub mod static_server;

// Re-export service implementations
pub use static_server::RealStaticFileServer;
