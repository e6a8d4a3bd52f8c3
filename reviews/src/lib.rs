//! Review dataset library for the McReviews dashboard
//!
//! Loads the base review dataset and the user submission log, and provides
//! the pure filter/aggregate pipeline every front end renders from.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;

// Re-export main types
pub use crate::core::*;
pub use error::{ReviewsError, ReviewsResult};
pub use services::{RealDatasetSource, RealSubmissionLog, load_store, merge_submissions};
pub use traits::{DatasetSource, SubmissionLog};
