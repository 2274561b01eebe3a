//! HTTP server configuration.

use serde::Deserialize;

/// Listener settings for `tradedesk serve`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:5000`.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Worker threads; defaults to actix-web's choice (one per core).
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_bind() -> String {
    "127.0.0.1:5000".into()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            workers: None,
        }
    }
}
