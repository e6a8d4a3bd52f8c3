//! Store reviews dashboard server
//!
//! Serves the review pipeline over a small JSON API together with the
//! static dashboard page.

pub mod error;
pub mod server;
pub mod services;
pub mod state;
pub mod traits;
pub mod web;

// Re-export main types
pub use error::{DashboardError, DashboardResult};
pub use server::{DashboardServer, build_router};
pub use services::RealStaticFileServer;
pub use state::DashboardState;
pub use traits::{StaticFileResponse, StaticFileServer};
