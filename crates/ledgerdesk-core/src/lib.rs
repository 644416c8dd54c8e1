//! # ledgerdesk-core
//!
//! Core crate for LedgerDesk. Contains configuration schemas,
//! pagination types, the object-store and mailer traits, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other LedgerDesk crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
