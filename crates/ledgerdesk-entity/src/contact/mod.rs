//! Contact requests from the public site and curated resource links.

pub mod link;
pub mod request;

pub use link::{CreateLink, Link, UpdateLink};
pub use request::{ContactRequest, CreateContactRequest};
