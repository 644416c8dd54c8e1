//! # ledgerdesk-auth
//!
//! Authentication building blocks for LedgerDesk.
//!
//! ## Modules
//!
//! - `jwt`: access token issuing, validation, and revocation
//! - `password`: Argon2id hashing, password policy, temporary passwords
//! - `oauth`: provider userinfo verification

pub mod jwt;
pub mod oauth;
pub mod password;

pub use jwt::{AccessToken, Claims, JwtDecoder, JwtEncoder, TokenRevocationList};
pub use oauth::{OAuthProfile, OAuthVerifier};
pub use password::{PasswordHasher, PasswordValidator, generate_temporary_password};
