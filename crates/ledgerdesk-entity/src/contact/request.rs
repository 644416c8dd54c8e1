//! Contact request ("open contact") entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A message left through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactRequest {
    /// Unique identifier.
    pub id: Uuid,
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Sender phone.
    pub phone: Option<String>,
    /// Sender company.
    pub company: Option<String>,
    /// Service the sender is interested in.
    pub service: Option<String>,
    /// Message body.
    pub message: String,
    /// Still awaiting follow-up.
    pub is_open: bool,
    /// Received at.
    pub created_at: DateTime<Utc>,
    /// When an admin closed it.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Data required to record a contact request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactRequest {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Sender phone.
    pub phone: Option<String>,
    /// Sender company.
    pub company: Option<String>,
    /// Service of interest.
    pub service: Option<String>,
    /// Message body.
    pub message: String,
}
