//! Request context carrying the authenticated user and token identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ledgerdesk_core::error::AppError;
use ledgerdesk_entity::user::UserRole;

/// Context for the current authenticated request.
///
/// Built from a verified access token and passed into service methods so
/// that every operation knows *who* is acting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's current role.
    pub role: UserRole,
    /// The user's current email.
    pub email: String,
    /// ID of the presented access token.
    pub token_id: Uuid,
    /// When the presented token expires.
    pub token_expires_at: DateTime<Utc>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        email: String,
        token_id: Uuid,
        token_expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            role,
            email,
            token_id,
            token_expires_at,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the current user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Fails with 403 unless the current user is an admin.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("Administrator access required"))
        }
    }
}

#[cfg(test)]
mod tests {
    use ledgerdesk_core::error::ErrorKind;

    use super::*;

    #[test]
    fn test_require_admin() {
        let mut ctx = RequestContext::new(
            Uuid::new_v4(),
            UserRole::Client,
            "client@acme.test".into(),
            Uuid::new_v4(),
            Utc::now(),
        );
        assert_eq!(ctx.require_admin().unwrap_err().kind, ErrorKind::Forbidden);

        ctx.role = UserRole::Admin;
        assert!(ctx.require_admin().is_ok());
    }
}
