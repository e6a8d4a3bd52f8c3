//! Dashboard-specific error types

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use reviews::ReviewsError;
use serde_json::json;
use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP server startup failed on {addr}")]
    ServerStartupFailed { addr: String },

    #[error("Static file not found: {path}")]
    StaticFileNotFound { path: String },

    #[error("Access denied: {path}")]
    AccessDenied { path: String },

    #[error("Invalid request: {details}")]
    InvalidRequest { details: String },

    #[error("Review store error: {0}")]
    Reviews(#[from] ReviewsError),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DashboardError {
    pub fn invalid_request(details: impl Into<String>) -> Self {
        Self::InvalidRequest { details: details.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// HTTP status the error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            Self::StaticFileNotFound { .. } => StatusCode::NOT_FOUND,
            Self::AccessDenied { .. } => StatusCode::FORBIDDEN,
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Reviews(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            shared::logging::log_error(shared::ProcessId::current(), "Request", &self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
