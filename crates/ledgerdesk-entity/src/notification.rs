//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An in-portal notification for one user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Recipient.
    pub user_id: Uuid,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Portal path the notification points at.
    pub link: Option<String>,
    /// Whether the recipient has seen it.
    pub is_read: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// Recipient.
    pub user_id: Uuid,
    /// Headline.
    pub title: String,
    /// Body.
    pub message: String,
    /// Portal path.
    pub link: Option<String>,
}
