//! Admin console handlers. Mounted behind the admin guard.

pub mod blog;
pub mod contacts;
pub mod files;
pub mod folders;
pub mod forms;
pub mod links;
pub mod testimonials;
pub mod users;
