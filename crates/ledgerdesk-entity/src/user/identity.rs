//! Linked OAuth identities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An external OAuth account linked to a portal user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserIdentity {
    /// Provider name (`google`, `microsoft`, ...).
    pub provider: String,
    /// Subject identifier issued by the provider.
    pub provider_account_id: String,
    /// The linked user.
    pub user_id: Uuid,
    /// When the identity was linked.
    pub created_at: DateTime<Utc>,
}
