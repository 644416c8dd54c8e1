//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A portal account (admin or client).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Login email (unique, case-insensitive).
    pub email: String,
    /// Argon2 password hash. `None` for OAuth-only accounts.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// User role.
    pub role: UserRole,
    /// Company the client belongs to.
    pub company: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Avatar URL.
    pub image_url: Option<String>,
    /// Number of consecutive failed login attempts.
    #[serde(skip_serializing)]
    pub failed_login_attempts: i32,
    /// Account locked until this time (if locked).
    pub locked_until: Option<DateTime<Utc>>,
    /// Last successful login time.
    pub last_login_at: Option<DateTime<Utc>>,
    /// The admin who created this user.
    pub created_by: Option<Uuid>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if the user account is currently locked.
    pub fn is_locked(&self) -> bool {
        self.locked_until
            .map(|until| Utc::now() < until)
            .unwrap_or(false)
    }

    /// Check if this user has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: Option<String>,
    /// Assigned role.
    pub role: UserRole,
    /// Company.
    pub company: Option<String>,
    /// Phone.
    pub phone: Option<String>,
    /// Creating admin's user ID (optional).
    pub created_by: Option<Uuid>,
}

/// Profile fields that may be updated. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New name.
    pub name: Option<String>,
    /// New email (admin only).
    pub email: Option<String>,
    /// New role (admin only).
    pub role: Option<UserRole>,
    /// New company.
    pub company: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New avatar URL.
    pub image_url: Option<String>,
}
