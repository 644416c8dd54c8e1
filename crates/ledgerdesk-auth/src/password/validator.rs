//! Password policy enforcement for new passwords.

use ledgerdesk_core::config::AuthConfig;
use ledgerdesk_core::error::AppError;

/// Validates password strength against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Create a validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Check a password, returning the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(char::is_alphabetic) {
            return Err(AppError::validation(
                "Password must contain at least one letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too easy to guess. Use a longer or less common password.",
            ));
        }

        Ok(())
    }

    /// Check that a new password differs from the current one.
    pub fn validate_not_same(&self, current: &str, new: &str) -> Result<(), AppError> {
        if current == new {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_rejects_short_and_weak() {
        assert!(validator().validate("Ab1").is_err());
        assert!(validator().validate("password1").is_err());
        assert!(validator().validate("onlyletterslong").is_err());
        assert!(validator().validate("1234567890").is_err());
    }

    #[test]
    fn test_accepts_strong() {
        assert!(validator().validate("quarterly-Ledger-47-walrus").is_ok());
    }

    #[test]
    fn test_not_same() {
        assert!(validator().validate_not_same("a", "a").is_err());
        assert!(validator().validate_not_same("a", "b").is_ok());
    }
}
