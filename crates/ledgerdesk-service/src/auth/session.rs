//! Resolving a verified access token into the caller's current context.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::debug;
use uuid::Uuid;

use ledgerdesk_auth::Claims;
use ledgerdesk_core::error::AppError;
use ledgerdesk_database::repositories::UserRepository;
use ledgerdesk_entity::user::AccountStanding;

use crate::context::RequestContext;

/// How long a looked-up standing is reused before the row is read again.
const STANDING_TTL: Duration = Duration::from_secs(30);

/// Upper bound on cached accounts.
const MAX_ENTRIES: u64 = 10_000;

/// Checks a token's subject against the account as it is now.
///
/// Role and email come from the users table, never from the token. A
/// token for a removed account, or one issued before the account's
/// token epoch, is rejected. Lookups are cached briefly per user;
/// services that change an account call [`SessionValidator::forget`].
#[derive(Debug, Clone)]
pub struct SessionValidator {
    user_repo: Arc<UserRepository>,
    standings: Cache<Uuid, AccountStanding>,
}

impl SessionValidator {
    /// Creates a validator backed by the user repository.
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self {
            user_repo,
            standings: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(STANDING_TTL)
                .build(),
        }
    }

    /// Build the request context for already-verified claims.
    pub async fn authenticate(&self, claims: &Claims) -> Result<RequestContext, AppError> {
        let user_id = claims.user_id();
        let standing = self.standing(user_id).await?;
        context_for(claims, standing)
    }

    /// Drop the cached standing so the next request reads the row.
    pub async fn forget(&self, user_id: Uuid) {
        self.standings.invalidate(&user_id).await;
    }

    async fn standing(&self, user_id: Uuid) -> Result<Option<AccountStanding>, AppError> {
        if let Some(standing) = self.standings.get(&user_id).await {
            return Ok(Some(standing));
        }
        let standing = self.user_repo.find_standing(user_id).await?;
        if let Some(standing) = &standing {
            self.standings.insert(user_id, standing.clone()).await;
        }
        Ok(standing)
    }
}

fn context_for(
    claims: &Claims,
    standing: Option<AccountStanding>,
) -> Result<RequestContext, AppError> {
    let user_id = claims.user_id();
    let Some(standing) = standing else {
        debug!(%user_id, "Token subject no longer exists");
        return Err(AppError::unauthorized("Account no longer exists"));
    };
    if !standing.accepts(claims.iat) {
        debug!(%user_id, jti = %claims.jti, "Token predates account changes");
        return Err(AppError::unauthorized(
            "Session is no longer valid. Please sign in again.",
        ));
    }

    Ok(RequestContext::new(
        user_id,
        standing.role,
        standing.email,
        claims.jti,
        claims.expires_at(),
    ))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration as ChronoDuration, Utc};
    use ledgerdesk_core::config::DatabaseConfig;
    use ledgerdesk_core::error::ErrorKind;
    use ledgerdesk_database::DatabasePool;
    use ledgerdesk_entity::user::UserRole;

    use super::*;

    fn claims(role: UserRole, issued_at: i64) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            role,
            email: "old@acme.test".into(),
            iat: issued_at,
            exp: issued_at + 3600,
            jti: Uuid::new_v4(),
        }
    }

    fn standing(role: UserRole, valid_after: chrono::DateTime<Utc>) -> AccountStanding {
        AccountStanding {
            role,
            email: "current@acme.test".into(),
            tokens_valid_after: valid_after,
        }
    }

    /// A validator whose repository never connects.
    fn offline_validator() -> SessionValidator {
        let pool = DatabasePool::connect_lazy(&DatabaseConfig {
            url: "postgres://ledgerdesk@127.0.0.1:1/ledgerdesk".into(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        })
        .unwrap();
        SessionValidator::new(Arc::new(UserRepository::new(pool.pool().clone())))
    }

    #[test]
    fn test_role_and_email_come_from_the_account() {
        let now = Utc::now();
        let claims = claims(UserRole::Admin, now.timestamp());
        let ctx = context_for(&claims, Some(standing(UserRole::Client, now))).unwrap();

        assert_eq!(ctx.user_id, claims.sub);
        assert_eq!(ctx.role, UserRole::Client);
        assert_eq!(ctx.email, "current@acme.test");
        assert_eq!(ctx.require_admin().unwrap_err().kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_missing_account_is_unauthorized() {
        let claims = claims(UserRole::Admin, Utc::now().timestamp());
        let err = context_for(&claims, None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[test]
    fn test_token_before_epoch_is_unauthorized() {
        let now = Utc::now();
        let stale = claims(UserRole::Client, (now - ChronoDuration::minutes(1)).timestamp());
        let err = context_for(&stale, Some(standing(UserRole::Client, now))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_cached_standing_is_used_until_forgotten() {
        let validator = offline_validator();
        let now = Utc::now();
        let claims = claims(UserRole::Admin, now.timestamp());
        validator
            .standings
            .insert(claims.sub, standing(UserRole::Client, now - ChronoDuration::hours(1)))
            .await;

        let ctx = validator.authenticate(&claims).await.unwrap();
        assert_eq!(ctx.role, UserRole::Client);

        validator.forget(claims.sub).await;
        assert!(validator.standings.get(&claims.sub).await.is_none());
    }
}
