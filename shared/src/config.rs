//! Configuration types shared by the dashboard server and the CLI

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::errors::{SharedError, SharedResult};

/// Default location of the base review dataset
pub const DEFAULT_DATASET_PATH: &str = "McDonald_s_Reviews(in).csv";

/// Default location of the user submission log
pub const DEFAULT_SUBMISSIONS_PATH: &str = "submitted_reviews.csv";

/// Default directory for the dashboard's static assets
pub const DEFAULT_STATIC_DIR: &str = "./static";

/// File locations every front end needs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DataPaths {
    pub dataset: PathBuf,
    pub submissions: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET_PATH),
            submissions: PathBuf::from(DEFAULT_SUBMISSIONS_PATH),
        }
    }
}

/// Dashboard server configuration
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct DashboardConfig {
    pub host: String,
    pub port: u16,
    pub paths: DataPaths,
    pub static_dir: PathBuf,
    pub log_level: String,
}

impl DashboardConfig {
    /// Resolve the socket address the HTTP server binds to
    pub fn bind_addr(&self) -> SharedResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| SharedError::InvalidConfig {
                field: "host".to_string(),
                value: self.host.clone(),
            })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            paths: DataPaths::default(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            log_level: "info".to_string(),
        }
    }
}

/// Load a `.env` file from the working directory if one exists.
///
/// Returns whether a file was loaded; a missing file is not an error, a
/// malformed one is.
pub fn load_env_file() -> SharedResult<bool> {
    match dotenv::dotenv() {
        Ok(_) => Ok(true),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(SharedError::EnvFileError { message: e.to_string() }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let paths = DataPaths::default();
        assert_eq!(paths.dataset, PathBuf::from("McDonald_s_Reviews(in).csv"));
        assert_eq!(paths.submissions, PathBuf::from("submitted_reviews.csv"));
    }

    #[test]
    fn test_bind_addr() {
        let config = DashboardConfig {
            port: 9090,
            ..DashboardConfig::default()
        };
        assert_eq!(config.bind_addr().unwrap(), "127.0.0.1:9090".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_bind_addr_rejects_bad_host() {
        let config = DashboardConfig {
            host: "not a host".to_string(),
            ..DashboardConfig::default()
        };
        assert!(matches!(
            config.bind_addr(),
            Err(SharedError::InvalidConfig { field, .. }) if field == "host"
        ));
    }
}
