//! `[server]` section: listener, request timeout, browser CORS.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Requests running longer than this are cut off.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Which browser origins may call the API.
    #[serde(default)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_seconds: default_request_timeout(),
            cors: CorsConfig::default(),
        }
    }
}

/// Cross-origin rules for the marketing site and portal frontends.
///
/// A single `"*"` entry in a list allows anything for that list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Frontend origins, e.g. `https://portal.example-cpa.com`.
    #[serde(default = "default_origins")]
    pub allowed_origins: Vec<String>,
    /// Methods the frontends use.
    #[serde(default = "default_methods")]
    pub allowed_methods: Vec<String>,
    /// Request headers the frontends send.
    #[serde(default = "default_headers")]
    pub allowed_headers: Vec<String>,
    /// Preflight cache lifetime.
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,
}

impl CorsConfig {
    /// Whether `list` is the `"*"` wildcard.
    pub fn is_wildcard(list: &[String]) -> bool {
        list.iter().any(|entry| entry == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_origins(),
            allowed_methods: default_methods(),
            allowed_headers: default_headers(),
            max_age_seconds: default_max_age(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_headers() -> Vec<String> {
    vec!["authorization".to_string(), "content-type".to_string()]
}

fn default_max_age() -> u64 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.bind_address(), "0.0.0.0:8080");
        assert_eq!(server.request_timeout(), Duration::from_secs(30));
        assert!(CorsConfig::is_wildcard(&server.cors.allowed_origins));
        assert!(!CorsConfig::is_wildcard(&server.cors.allowed_headers));
    }

    #[test]
    fn test_wildcard() {
        assert!(CorsConfig::is_wildcard(&["*".to_string()]));
        assert!(!CorsConfig::is_wildcard(&[]));
    }
}
