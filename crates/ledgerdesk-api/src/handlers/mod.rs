//! Route handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod file;
pub mod form;
pub mod health;
pub mod notification;
pub mod public;
pub mod user;
