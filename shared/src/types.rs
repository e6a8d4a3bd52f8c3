//! Process identity used to tag log output

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Global process ID singleton - set once at startup
static PROCESS_ID: OnceLock<ProcessId> = OnceLock::new();

/// Identifier for the binary currently running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessId {
    /// HTTP dashboard server
    Dashboard,
    /// Command line front end
    Cli,
    /// Library use without a binary (tests, embedding)
    Embedded,
}

impl ProcessId {
    /// Initialize the global process ID for the dashboard server
    pub fn init_dashboard() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Dashboard)
    }

    /// Initialize the global process ID for the command line front end
    pub fn init_cli() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Cli)
    }

    /// Get the global process ID, falling back to `Embedded` when no binary claimed it
    pub fn current() -> &'static ProcessId {
        PROCESS_ID.get_or_init(|| ProcessId::Embedded)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessId::Dashboard => write!(f, "dashboard"),
            ProcessId::Cli => write!(f, "cli"),
            ProcessId::Embedded => write!(f, "embedded"),
        }
    }
}

impl Default for ProcessId {
    fn default() -> Self {
        ProcessId::Embedded
    }
}
