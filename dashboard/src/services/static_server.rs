//! Static file serving service
//!
//! Serves the dashboard page and its assets from a directory on disk.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use shared::{ProcessId, process_debug, process_error, process_warn};

use crate::error::{DashboardError, DashboardResult};
use crate::traits::{StaticFileResponse, StaticFileServer};

const INDEX_FILE: &str = "index.html";

/// Real static file server implementation
#[derive(Debug, Clone)]
pub struct RealStaticFileServer {
    base_dir: PathBuf,
}

impl RealStaticFileServer {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a request path inside the base directory.
    ///
    /// Both sides are canonicalized so `..` segments and symlinks cannot
    /// escape the base directory.
    fn resolve_path(&self, request_path: &str) -> DashboardResult<PathBuf> {
        let clean_path = request_path.trim_start_matches('/');
        let file_path = if clean_path.is_empty() { INDEX_FILE } else { clean_path };

        let canonical_path =
            self.base_dir
                .join(file_path)
                .canonicalize()
                .map_err(|_| DashboardError::StaticFileNotFound {
                    path: request_path.to_string(),
                })?;

        let canonical_base = self.base_dir.canonicalize().map_err(|e| {
            process_error!(ProcessId::current(), "Failed to canonicalize static directory: {}", e);
            DashboardError::internal("Static file directory not accessible")
        })?;

        if !canonical_path.starts_with(&canonical_base) {
            return Err(DashboardError::AccessDenied {
                path: request_path.to_string(),
            });
        }

        Ok(canonical_path)
    }
}

/// MIME type from the file extension
fn mime_type(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("csv") => "text/csv",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}

/// Cache control header based on file type
fn cache_control(path: &Path) -> Option<&'static str> {
    match extension(path).as_deref() {
        Some("html") => Some("no-cache"),
        Some("js" | "css") => Some("public, max-age=3600"),
        Some("png" | "jpg" | "jpeg" | "svg" | "ico") => Some("public, max-age=86400"),
        _ => None,
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension().and_then(|e| e.to_str()).map(str::to_lowercase)
}

#[async_trait]
impl StaticFileServer for RealStaticFileServer {
    async fn serve_file(&self, path: &str) -> DashboardResult<StaticFileResponse> {
        let mut file_path = self.resolve_path(path)?;

        if file_path.is_dir() {
            file_path.push(INDEX_FILE);
            if !file_path.is_file() {
                return Err(DashboardError::StaticFileNotFound { path: path.to_string() });
            }
        }

        match fs::read(&file_path).await {
            Ok(content) => {
                process_debug!(ProcessId::current(), "📄 Served static file: {} ({} bytes)", path, content.len());

                let mut response = StaticFileResponse::new(content, mime_type(&file_path));
                if let Some(cache) = cache_control(&file_path) {
                    response = response.with_cache_control(cache);
                }
                Ok(response)
            }
            Err(e) => {
                process_warn!(ProcessId::current(), "❌ Failed to read static file {}: {}", path, e);
                Err(DashboardError::StaticFileNotFound { path: path.to_string() })
            }
        }
    }

    async fn file_exists(&self, path: &str) -> bool {
        self.resolve_path(path).map(|p| p.exists()).unwrap_or(false)
    }
}

impl Default for RealStaticFileServer {
    fn default() -> Self {
        Self::new(shared::config::DEFAULT_STATIC_DIR)
    }
}
