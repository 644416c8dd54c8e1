//! The slice of a user row that authenticates a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;

/// Current role, email, and token epoch of an account.
///
/// Loaded for every authenticated request so that a token never carries
/// more authority than the account has now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AccountStanding {
    /// Role as stored, not as claimed by the token.
    pub role: UserRole,
    /// Current login email.
    pub email: String,
    /// Tokens issued before this instant are no longer honored.
    pub tokens_valid_after: DateTime<Utc>,
}

impl AccountStanding {
    /// Whether a token with the given `iat` (seconds since the epoch) is still honored.
    pub fn accepts(&self, issued_at: i64) -> bool {
        issued_at >= self.tokens_valid_after.timestamp()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    #[test]
    fn test_accepts_tokens_from_epoch_on() {
        let epoch = Utc.with_ymd_and_hms(2024, 4, 15, 9, 30, 0).unwrap();
        let standing = AccountStanding {
            role: UserRole::Client,
            email: "client@example.com".into(),
            tokens_valid_after: epoch,
        };

        assert!(standing.accepts(epoch.timestamp()));
        assert!(standing.accepts((epoch + Duration::minutes(5)).timestamp()));
        assert!(!standing.accepts(epoch.timestamp() - 1));
    }
}
