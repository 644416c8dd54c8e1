//! JWT token management.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod revocation;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::{AccessToken, JwtEncoder};
pub use revocation::TokenRevocationList;
