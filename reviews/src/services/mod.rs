//! Service implementations
//!
//! Real, file-backed implementations of the service traits

pub mod csv_table;
pub mod dataset_loader;
pub mod submission_log;

// Re-export service implementations
pub use dataset_loader::{RealDatasetSource, load_store, merge_submissions};
pub use submission_log::RealSubmissionLog;
