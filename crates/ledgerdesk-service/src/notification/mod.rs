//! User notifications.

pub mod service;

pub use service::{NotificationPage, NotificationService};
