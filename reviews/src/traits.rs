//! Service trait definitions for dependency injection
//!
//! File access is abstracted through these traits so front ends and tests
//! can swap in fakes

use crate::core::record::{NewReview, ReviewRecord};
use crate::error::ReviewsResult;

/// Source of the base review dataset
#[mockall::automock]
pub trait DatasetSource: Send + Sync {
    /// Load and clean every base record; failure here is fatal to startup
    fn load_base(&self) -> ReviewsResult<Vec<ReviewRecord>>;

    /// Human-readable location of the dataset for logs
    fn describe(&self) -> String;
}

/// Persisted log of user-submitted reviews
#[mockall::automock]
pub trait SubmissionLog: Send + Sync {
    /// Whether the log file exists yet
    fn exists(&self) -> bool;

    /// Read every persisted submission; a missing log yields no records
    fn read_all(&self) -> ReviewsResult<Vec<ReviewRecord>>;

    /// Persist one submission and return the stored record
    fn append(&self, review: NewReview) -> ReviewsResult<ReviewRecord>;
}
