//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for sensitive values like `TRADEDESK_SECRET_KEY`.
//!
//! # Example
//!
//! ```no_run
//! use tradedesk::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::auth::{AuthConfig, SECRET_KEY_ENV};
use super::database::DatabaseConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::tables::TablesConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional; a missing file section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    /// Allow-listed tables and per-column field hooks.
    #[serde(default)]
    pub tables: TablesConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read, parsed, or fails
    /// validation.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Self::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
    }

    /// Parse and validate configuration from TOML text.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var(SECRET_KEY_ENV) {
            if !secret.is_empty() {
                self.auth.secret_key = secret;
            }
        }
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.server.bind.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "server.bind" }.into());
        }
        if self.server.workers == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "server.workers",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.path",
            }
            .into());
        }
        if self.database.pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.pool_size",
                reason: "must be at least 1".into(),
            }
            .into());
        }
        if self.auth.secret_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "auth.secret_key",
            }
            .into());
        }
        if self.auth.session_hours <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.session_hours",
                reason: format!("must be positive, got {}", self.auth.session_hours),
            }
            .into());
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "auth.bcrypt_cost",
                reason: format!("must be between 4 and 31, got {}", self.auth.bcrypt_cost),
            }
            .into());
        }
        if self.tables.allow.is_empty() {
            return Err(ConfigError::MissingField {
                field: "tables.allow",
            }
            .into());
        }
        if let Some(blank) = self.tables.allow.iter().find(|name| name.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "tables.allow",
                reason: format!("blank table name {blank:?}"),
            }
            .into());
        }
        for field in &self.tables.hashed_fields {
            if !self.tables.allow.contains(&field.table) {
                return Err(ConfigError::InvalidValue {
                    field: "tables.hashed_fields",
                    reason: format!("table {} is not in tables.allow", field.table),
                }
                .into());
            }
        }
        if !self.logging.is_known_format() {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize tracing from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
