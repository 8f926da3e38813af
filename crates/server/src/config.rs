//! Server configuration.

use anyhow::{Context, Result};
use sealwatch_query::{QueryConfig, DEFAULT_RECENT_WINDOW};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Settings read from `config.json`; any missing field takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub listen: SocketAddr,
    /// Directory of the sled database holding headers and snapshots.
    pub data_dir: PathBuf,
    /// Number of blocks before the head that `/status` reports on.
    pub recent_window: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8545)),
            data_dir: PathBuf::from("./data"),
            recent_window: DEFAULT_RECENT_WINDOW,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn query_config(&self) -> QueryConfig {
        QueryConfig::new(self.recent_window)
    }
}
