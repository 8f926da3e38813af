//! Query configuration.

use serde::{Deserialize, Serialize};

/// Number of most recent blocks the status report covers.
pub const DEFAULT_RECENT_WINDOW: u64 = 64;

/// Tunables for the query layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Number of blocks before the head that `status` reports on.
    pub recent_window: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            recent_window: DEFAULT_RECENT_WINDOW,
        }
    }
}

impl QueryConfig {
    /// Create a configuration with the given recent window.
    pub fn new(recent_window: u64) -> Self {
        Self { recent_window }
    }
}
