//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

fn default_from() -> String {
    "pulse@localhost".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// HTTP endpoint of the mail delivery API.
    #[serde(default)]
    pub api_url: String,

    /// Bearer token for the mail delivery API.
    #[serde(default)]
    pub api_key: String,

    /// Sender address.
    #[serde(default = "default_from")]
    pub from: String,

    /// Request timeout for a single send.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            api_key: String::new(),
            from: default_from(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MailConfig {
    /// Check if transport credentials are present. Without them messages are
    /// logged instead of sent.
    pub fn is_configured(&self) -> bool {
        !self.api_url.is_empty() && !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = MailConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.from, "pulse@localhost");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn configured_when_url_and_key_set() {
        let config = MailConfig {
            api_url: "https://mail.example.com/v1/send".into(),
            api_key: "key-123".into(),
            ..Default::default()
        };
        assert!(config.is_configured());

        let missing_key = MailConfig {
            api_url: "https://mail.example.com/v1/send".into(),
            ..Default::default()
        };
        assert!(!missing_key.is_configured());
    }
}
