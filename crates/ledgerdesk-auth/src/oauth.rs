//! OAuth sign-in verification.
//!
//! The browser completes the provider's OAuth flow and hands us the
//! provider access token. We call the provider's userinfo endpoint with
//! it to learn who the caller is; the token itself is never stored.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use ledgerdesk_core::config::OAuthProviderConfig;
use ledgerdesk_core::error::{AppError, ErrorKind};

const USERINFO_TIMEOUT: Duration = Duration::from_secs(10);

/// Identity reported by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProfile {
    /// Provider-scoped account ID (`sub`, or `id` for non-OIDC providers).
    pub subject: String,
    /// Account email.
    pub email: String,
    /// Display name, if the provider shares one.
    pub name: Option<String>,
}

/// Calls provider userinfo endpoints.
#[derive(Debug, Clone)]
pub struct OAuthVerifier {
    client: reqwest::Client,
    providers: HashMap<String, OAuthProviderConfig>,
}

impl OAuthVerifier {
    /// Create a verifier for the configured providers.
    pub fn new(providers: HashMap<String, OAuthProviderConfig>) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(USERINFO_TIMEOUT)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self { client, providers })
    }

    /// Whether a provider is configured.
    pub fn supports(&self, provider: &str) -> bool {
        self.providers.contains_key(provider)
    }

    /// Resolve a provider access token to the caller's profile.
    pub async fn fetch_profile(
        &self,
        provider: &str,
        access_token: &str,
    ) -> Result<OAuthProfile, AppError> {
        let config = self
            .providers
            .get(provider)
            .ok_or_else(|| AppError::not_found(format!("Unknown sign-in provider '{provider}'")))?;

        let response = self
            .client
            .get(&config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Sign-in provider unreachable", e)
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            debug!(provider, %status, "Provider rejected access token");
            return Err(AppError::unauthorized("Sign-in token was rejected by the provider"));
        }
        if !status.is_success() {
            warn!(provider, %status, "Provider userinfo request failed");
            return Err(AppError::external_service(format!(
                "Sign-in provider returned {status}"
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Malformed userinfo response", e)
        })?;
        parse_profile(&body)
    }
}

/// Extract a profile from a userinfo document.
pub fn parse_profile(body: &Value) -> Result<OAuthProfile, AppError> {
    let subject = match body.get("sub").or_else(|| body.get("id")) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => {
            return Err(AppError::external_service(
                "Userinfo response has no account id",
            ));
        }
    };

    let email = body
        .get("email")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::forbidden("The provider did not share an email address"))?
        .to_string();

    if body.get("email_verified").and_then(Value::as_bool) == Some(false) {
        return Err(AppError::forbidden("The provider email address is not verified"));
    }

    let name = body
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|n| !n.trim().is_empty());

    Ok(OAuthProfile {
        subject,
        email,
        name,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_oidc_profile() {
        let profile = parse_profile(&json!({
            "sub": "1100220033",
            "email": "owner@acme.test",
            "email_verified": true,
            "name": "Avery Owner"
        }))
        .unwrap();
        assert_eq!(profile.subject, "1100220033");
        assert_eq!(profile.email, "owner@acme.test");
        assert_eq!(profile.name.as_deref(), Some("Avery Owner"));
    }

    #[test]
    fn test_parse_numeric_id() {
        let profile = parse_profile(&json!({"id": 42, "email": "a@b.test"})).unwrap();
        assert_eq!(profile.subject, "42");
        assert_eq!(profile.name, None);
    }

    #[test]
    fn test_missing_or_unverified_email() {
        let err = parse_profile(&json!({"sub": "x"})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let err = parse_profile(&json!({"sub": "x", "email": "a@b.test", "email_verified": false}))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_unknown_provider() {
        let verifier = OAuthVerifier::new(HashMap::new()).unwrap();
        assert!(!verifier.supports("google"));
        let err = verifier.fetch_profile("google", "tok").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
