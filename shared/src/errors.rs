//! Shared error types for the McReviews workspace

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Environment file error: {message}")]
    EnvFileError { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
