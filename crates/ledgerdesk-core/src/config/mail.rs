//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Transactional mail API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// When false, messages are logged instead of sent.
    #[serde(default)]
    pub enabled: bool,
    /// HTTP endpoint of the mail API (JSON `POST`).
    #[serde(default)]
    pub endpoint: String,
    /// Bearer token for the mail API.
    #[serde(default)]
    pub api_key: String,
    /// Sender address.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Public URL of the portal, used in message bodies.
    #[serde(default = "default_portal_url")]
    pub portal_url: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            api_key: String::new(),
            from_address: default_from(),
            portal_url: default_portal_url(),
        }
    }
}

fn default_from() -> String {
    "no-reply@localhost".to_string()
}

fn default_portal_url() -> String {
    "http://localhost:3000".to_string()
}
