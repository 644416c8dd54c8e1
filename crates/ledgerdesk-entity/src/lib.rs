//! # ledgerdesk-entity
//!
//! Domain entity models for LedgerDesk. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.
//!
//! Rules that need no I/O live here too: folder path algebra and tree
//! building, form answer validation, and slug generation.

pub mod blog;
pub mod contact;
pub mod file;
pub mod folder;
pub mod form;
pub mod notification;
pub mod testimonial;
pub mod user;
