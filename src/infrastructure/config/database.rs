//! Database location and pool configuration.

use serde::Deserialize;
use std::path::PathBuf;

use crate::adapter::outbound::sqlite::ConnectionOptions;

/// SQLite database settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path of the SQLite file. Parent directories are created on startup.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,
}

fn default_path() -> PathBuf {
    PathBuf::from("instance/tradedesk.sqlite")
}

const fn default_pool_size() -> u32 {
    5
}

const fn default_busy_timeout_ms() -> u32 {
    5000
}

impl DatabaseConfig {
    /// Connection string understood by Diesel's SQLite backend.
    #[must_use]
    pub fn url(&self) -> String {
        self.path.display().to_string()
    }

    #[must_use]
    pub fn connection_options(&self) -> ConnectionOptions {
        ConnectionOptions {
            max_size: self.pool_size,
            busy_timeout_ms: self.busy_timeout_ms,
            foreign_keys: true,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            pool_size: default_pool_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}
