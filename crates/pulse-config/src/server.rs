//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Shared secret used when none is configured. Logged as a warning at startup.
pub const INSECURE_DEFAULT_SECRET: &str = "change-me-insecure-default";

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_shared_secret() -> String {
    INSECURE_DEFAULT_SECRET.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Secret every authenticated caller must present alongside its identity.
    #[serde(default = "default_shared_secret")]
    pub shared_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            shared_secret: default_shared_secret(),
        }
    }
}

impl ServerConfig {
    /// Whether the built-in shared secret is still in use.
    pub fn uses_default_secret(&self) -> bool {
        self.shared_secret == INSECURE_DEFAULT_SECRET
    }
}
