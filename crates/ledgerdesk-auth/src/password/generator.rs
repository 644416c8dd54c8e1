//! Random temporary passwords for admin-created accounts.

use rand::Rng;
use rand::seq::SliceRandom;

/// Length of generated passwords.
pub const TEMPORARY_PASSWORD_LEN: usize = 16;

const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%^&*-_=+?";

/// Generate a 16-character password with at least one character from
/// every class. Look-alike characters (`l`, `I`, `O`, `0`, `1`) are left out.
pub fn generate_temporary_password() -> String {
    let mut rng = rand::thread_rng();
    let classes = [LOWER, UPPER, DIGITS, SYMBOLS];
    let all: Vec<u8> = classes.concat();

    let mut chars: Vec<u8> = classes
        .iter()
        .map(|class| class[rng.gen_range(0..class.len())])
        .collect();
    while chars.len() < TEMPORARY_PASSWORD_LEN {
        chars.push(all[rng.gen_range(0..all.len())]);
    }
    chars.shuffle(&mut rng);

    chars.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use ledgerdesk_core::config::AuthConfig;

    use super::*;
    use crate::password::PasswordValidator;

    #[test]
    fn test_shape() {
        let pw = generate_temporary_password();
        assert_eq!(pw.len(), TEMPORARY_PASSWORD_LEN);
        assert!(pw.chars().any(|c| c.is_ascii_lowercase()));
        assert!(pw.chars().any(|c| c.is_ascii_uppercase()));
        assert!(pw.chars().any(|c| c.is_ascii_digit()));
        assert!(pw.chars().any(|c| SYMBOLS.contains(&(c as u8))));
    }

    #[test]
    fn test_passes_policy() {
        let validator = PasswordValidator::new(&AuthConfig::default());
        for _ in 0..20 {
            validator.validate(&generate_temporary_password()).unwrap();
        }
    }

    #[test]
    fn test_not_repeated() {
        assert_ne!(generate_temporary_password(), generate_temporary_password());
    }
}
