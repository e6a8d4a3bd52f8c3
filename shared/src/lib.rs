//! Shared types for the McReviews workspace
//!
//! Contains the pieces every binary needs: process identity for log tagging,
//! logging setup, configuration defaults and the shared error type.

pub mod config;
pub mod errors;
pub mod logging;
pub mod types;

pub use config::{DashboardConfig, DataPaths};
pub use errors::*;
pub use types::*;
