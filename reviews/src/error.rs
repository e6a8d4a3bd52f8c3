//! Review pipeline error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewsError {
    #[error("Dataset unavailable: {path}")]
    DatasetUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset {path}: {message}")]
    MalformedDataset { path: String, message: String },

    #[error("Dataset {path} is missing required column '{column}'")]
    MissingColumn { path: String, column: String },

    #[error("Submission log read failed: {path}: {message}")]
    SubmissionRead { path: String, message: String },

    #[error("Submission log write failed: {path}")]
    SubmissionWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid submission: {reason}")]
    InvalidSubmission { reason: String },

    #[error("Shared component error")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl ReviewsError {
    /// Build an `InvalidSubmission` error
    pub fn invalid_submission(reason: impl Into<String>) -> Self {
        Self::InvalidSubmission { reason: reason.into() }
    }

    /// Whether the error stems from bad caller input rather than the environment
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidSubmission { .. })
    }
}

pub type ReviewsResult<T> = Result<T, ReviewsError>;
