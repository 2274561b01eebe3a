//! Authentication and session configuration.
//!
//! The signing secret may be overridden with `TRADEDESK_SECRET_KEY` so it
//! never has to live in the config file.

use serde::Deserialize;

/// Environment variable overriding [`AuthConfig::secret_key`].
pub const SECRET_KEY_ENV: &str = "TRADEDESK_SECRET_KEY";

/// Session and password hashing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 key for session tokens.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// Session lifetime in hours.
    #[serde(default = "default_session_hours")]
    pub session_hours: i64,
    /// Bcrypt cost factor (4..=31).
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Set the `Secure` flag on cookies; enable behind HTTPS.
    #[serde(default)]
    pub cookie_secure: bool,
}

fn default_secret_key() -> String {
    "dev".into()
}

const fn default_session_hours() -> i64 {
    24
}

const fn default_bcrypt_cost() -> u32 {
    12
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            session_hours: default_session_hours(),
            bcrypt_cost: default_bcrypt_cost(),
            cookie_secure: false,
        }
    }
}
