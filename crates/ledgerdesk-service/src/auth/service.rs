//! Sign-in flows: email/password with lockout, OAuth, sign-out.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use ledgerdesk_auth::{JwtEncoder, OAuthVerifier, PasswordHasher, TokenRevocationList};
use ledgerdesk_core::error::AppError;
use ledgerdesk_database::repositories::{IdentityRepository, UserRepository};
use ledgerdesk_entity::user::User;

use super::lockout::LockoutPolicy;
use crate::context::RequestContext;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub access_token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
    /// The signed-in user.
    pub user: User,
}

/// Issues and revokes access tokens.
#[derive(Debug, Clone)]
pub struct AuthService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Linked OAuth accounts.
    identity_repo: Arc<IdentityRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Token issuer.
    encoder: Arc<JwtEncoder>,
    /// Revoked token IDs, shared with the token decoder.
    revocations: TokenRevocationList,
    /// OAuth userinfo client.
    oauth: Arc<OAuthVerifier>,
    /// Failed-login policy.
    lockout: LockoutPolicy,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        identity_repo: Arc<IdentityRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        revocations: TokenRevocationList,
        oauth: Arc<OAuthVerifier>,
        lockout: LockoutPolicy,
    ) -> Self {
        Self {
            user_repo,
            identity_repo,
            hasher,
            encoder,
            revocations,
            oauth,
            lockout,
        }
    }

    /// Sign in with email and password.
    ///
    /// Every wrong password counts towards the lockout threshold. A
    /// locked account is rejected before the password is checked.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        check_not_locked(&user)?;

        let Some(hash) = user.password_hash.as_deref() else {
            // OAuth-only account
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, hash)? {
            let outcome = self.lockout.record_failure(&user, Utc::now());
            self.user_repo
                .record_login_failure(user.id, outcome.attempts, outcome.locked_until)
                .await?;

            if let Some(until) = outcome.locked_until {
                warn!(user_id = %user.id, attempts = outcome.attempts, "Account locked after failed logins");
                return Err(locked_error(until));
            }
            warn!(user_id = %user.id, attempts = outcome.attempts, "Failed login");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let user = self.user_repo.record_login_success(user.id).await?;
        info!(user_id = %user.id, "Login successful");
        self.issue(user)
    }

    /// Sign in with a provider access token.
    ///
    /// The account is found by a previously linked identity, then by
    /// email (linking the identity on first use). Accounts are never
    /// created here: portal users are provisioned by admins.
    pub async fn oauth_login(
        &self,
        provider: &str,
        provider_token: &str,
    ) -> Result<LoginResponse, AppError> {
        if !self.oauth.supports(provider) {
            return Err(AppError::not_found(format!(
                "Unknown sign-in provider '{provider}'"
            )));
        }

        let profile = self.oauth.fetch_profile(provider, provider_token).await?;

        let linked = match self.identity_repo.find(provider, &profile.subject).await? {
            Some(identity) => self.user_repo.find_by_id(identity.user_id).await?,
            None => None,
        };

        let user = match linked {
            Some(user) => user,
            None => {
                let user = self
                    .user_repo
                    .find_by_email(&profile.email)
                    .await?
                    .ok_or_else(|| {
                        AppError::forbidden(
                            "No portal account exists for this email. Contact the firm for access.",
                        )
                    })?;
                self.identity_repo
                    .link(provider, &profile.subject, user.id)
                    .await?;
                info!(user_id = %user.id, provider, "Linked sign-in identity");
                user
            }
        };

        check_not_locked(&user)?;

        let user = self.user_repo.record_login_success(user.id).await?;
        info!(user_id = %user.id, provider, "OAuth login successful");
        self.issue(user)
    }

    /// Revoke the token that authenticated this request.
    pub async fn logout(&self, ctx: &RequestContext) -> Result<(), AppError> {
        self.revocations.revoke(ctx.token_id).await;
        info!(user_id = %ctx.user_id, "Logout");
        Ok(())
    }

    /// The current user.
    pub async fn me(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))
    }

    fn issue(&self, user: User) -> Result<LoginResponse, AppError> {
        let token = self.encoder.issue(&user)?;
        Ok(LoginResponse {
            access_token: token.access_token,
            expires_at: token.expires_at,
            user,
        })
    }
}

fn check_not_locked(user: &User) -> Result<(), AppError> {
    match user.locked_until {
        Some(until) if user.is_locked() => Err(locked_error(until)),
        _ => Ok(()),
    }
}

fn locked_error(until: DateTime<Utc>) -> AppError {
    AppError::unauthorized(format!(
        "Account is locked after too many failed attempts. Try again after {}",
        until.format("%H:%M UTC")
    ))
}
