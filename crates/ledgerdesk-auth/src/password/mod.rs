//! Password hashing, policy enforcement, and temporary passwords.

pub mod generator;
pub mod hasher;
pub mod validator;

pub use generator::generate_temporary_password;
pub use hasher::PasswordHasher;
pub use validator::PasswordValidator;
