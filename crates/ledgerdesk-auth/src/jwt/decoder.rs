//! JWT validation and revocation checks.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use ledgerdesk_core::config::AuthConfig;
use ledgerdesk_core::error::AppError;

use super::claims::Claims;
use super::revocation::TokenRevocationList;

/// Validates access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: TokenRevocationList,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Create a decoder from auth configuration.
    pub fn new(config: &AuthConfig, revocations: TokenRevocationList) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            revocations,
        }
    }

    /// Decode an access token, rejecting bad signatures, expired tokens,
    /// and revoked token IDs.
    pub async fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("Token has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::unauthorized("Invalid token signature")
                }
                _ => AppError::unauthorized("Invalid token"),
            })?
            .claims;

        if self.revocations.is_revoked(&claims.jti).await {
            return Err(AppError::unauthorized("Token has been revoked"));
        }
        Ok(claims)
    }

    /// Revoke a token for the rest of its lifetime.
    pub async fn revoke(&self, claims: &Claims) {
        self.revocations.revoke(claims.jti).await;
    }
}
