//! Service trait definitions for dependency injection
//!
//! File-system access for the dashboard's own assets goes through these
//! traits; review storage traits live in the `reviews` crate.

use async_trait::async_trait;

use crate::error::DashboardResult;

/// Static file serving service trait
#[mockall::automock]
#[async_trait]
pub trait StaticFileServer: Send + Sync {
    /// Serve static file
    async fn serve_file(&self, path: &str) -> DashboardResult<StaticFileResponse>;

    /// Check if file exists
    async fn file_exists(&self, path: &str) -> bool;
}

/// Static file response
#[derive(Debug, Clone)]
pub struct StaticFileResponse {
    pub content: Vec<u8>,
    pub content_type: String,
    pub cache_control: Option<String>,
}

impl StaticFileResponse {
    pub fn new(content: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            content,
            content_type: content_type.into(),
            cache_control: None,
        }
    }

    /// Set cache control header
    pub fn with_cache_control(mut self, cache_control: impl Into<String>) -> Self {
        self.cache_control = Some(cache_control.into());
        self
    }
}
