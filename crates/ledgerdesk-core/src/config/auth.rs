//! `[auth]` section: token signing, password policy, lockout, OAuth providers.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Shortest HMAC key accepted without a warning.
pub const MIN_SECRET_BYTES: usize = 32;

/// Credential and session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 signing key for access tokens. Override in every deployment.
    pub jwt_secret: String,
    /// Access token lifetime. There is no refresh token; clients sign in again.
    pub jwt_access_ttl_minutes: u64,
    /// Minimum length for new passwords.
    pub password_min_length: usize,
    /// Consecutive failed logins that lock an account.
    pub max_failed_attempts: i32,
    /// How long a locked account stays locked.
    pub lockout_duration_minutes: u64,
    /// Sign-in providers by path name, e.g. `[auth.oauth.google]`.
    pub oauth: HashMap<String, OAuthProviderConfig>,
}

/// A provider whose access tokens are exchanged for a portal session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthProviderConfig {
    /// Endpoint returning the caller's `sub` and `email`.
    pub userinfo_url: String,
}

impl AuthConfig {
    /// Access token lifetime as a [`Duration`].
    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.jwt_access_ttl_minutes * 60)
    }

    /// Whether the signing key is too short to be trusted.
    pub fn has_weak_secret(&self) -> bool {
        self.jwt_secret.len() < MIN_SECRET_BYTES
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "ledgerdesk-dev-secret-change-me".to_string(),
            jwt_access_ttl_minutes: 60,
            password_min_length: 8,
            max_failed_attempts: 5,
            lockout_duration_minutes: 15,
            oauth: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AuthConfig = serde_json::from_str(
            r#"{"jwt_access_ttl_minutes": 30, "oauth": {"google": {"userinfo_url": "https://openidconnect.googleapis.com/v1/userinfo"}}}"#,
        )
        .unwrap();
        assert_eq!(config.access_ttl(), Duration::from_secs(1800));
        assert_eq!(config.max_failed_attempts, 5);
        assert!(config.oauth.contains_key("google"));
    }

    #[test]
    fn test_default_secret_is_weak() {
        assert!(AuthConfig::default().has_weak_secret());
        let config = AuthConfig {
            jwt_secret: "x".repeat(MIN_SECRET_BYTES),
            ..AuthConfig::default()
        };
        assert!(!config.has_weak_secret());
    }
}
