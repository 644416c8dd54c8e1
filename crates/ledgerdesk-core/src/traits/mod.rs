//! Core traits defined in `ledgerdesk-core` and implemented by other crates.

pub mod mailer;
pub mod storage;

pub use mailer::{MailMessage, Mailer};
pub use storage::{ObjectStore, PresignedUrl};
