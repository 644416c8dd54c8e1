//! Linked OAuth identity repository.

use sqlx::PgPool;
use uuid::Uuid;

use ledgerdesk_core::error::{AppError, ErrorKind};
use ledgerdesk_core::result::AppResult;
use ledgerdesk_entity::user::UserIdentity;

/// Repository for provider account links.
#[derive(Debug, Clone)]
pub struct IdentityRepository {
    pool: PgPool,
}

impl IdentityRepository {
    /// Create a new identity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the link for a provider account.
    pub async fn find(
        &self,
        provider: &str,
        provider_account_id: &str,
    ) -> AppResult<Option<UserIdentity>> {
        sqlx::query_as::<_, UserIdentity>(
            "SELECT * FROM user_identities WHERE provider = $1 AND provider_account_id = $2",
        )
        .bind(provider)
        .bind(provider_account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find identity", e))
    }

    /// Link a provider account to a user. Re-linking the same pair is a no-op.
    pub async fn link(
        &self,
        provider: &str,
        provider_account_id: &str,
        user_id: Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO user_identities (provider, provider_account_id, user_id) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (provider, provider_account_id) DO NOTHING",
        )
        .bind(provider)
        .bind(provider_account_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link identity", e))?;
        Ok(())
    }
}
