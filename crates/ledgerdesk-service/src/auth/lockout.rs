//! Failed-login counting and account lockout.

use chrono::{DateTime, Duration, Utc};

use ledgerdesk_core::config::AuthConfig;
use ledgerdesk_entity::user::User;

/// Lockout thresholds taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct LockoutPolicy {
    /// Failures that trigger a lockout.
    pub max_failed_attempts: i32,
    /// How long a lockout lasts.
    pub lockout_duration: Duration,
}

/// Counter and deadline to store after a failed login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureOutcome {
    /// New value of `failed_login_attempts`.
    pub attempts: i32,
    /// New value of `locked_until`.
    pub locked_until: Option<DateTime<Utc>>,
}

impl FailureOutcome {
    /// Whether this failure locked the account.
    pub fn is_locked(&self) -> bool {
        self.locked_until.is_some()
    }
}

impl LockoutPolicy {
    /// Build the policy from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            max_failed_attempts: config.max_failed_attempts.max(1),
            lockout_duration: Duration::minutes(config.lockout_duration_minutes as i64),
        }
    }

    /// Compute the state after one more failed attempt.
    ///
    /// A lock that has already expired starts a fresh count.
    pub fn record_failure(&self, user: &User, now: DateTime<Utc>) -> FailureOutcome {
        let previous = match user.locked_until {
            Some(until) if until <= now => 0,
            _ => user.failed_login_attempts,
        };
        let attempts = previous.saturating_add(1);
        let locked_until =
            (attempts >= self.max_failed_attempts).then(|| now + self.lockout_duration);

        FailureOutcome {
            attempts,
            locked_until,
        }
    }
}
