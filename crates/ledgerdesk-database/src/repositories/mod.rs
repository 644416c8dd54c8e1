//! Repository implementations for all LedgerDesk entities.

pub mod blog;
pub mod contact;
pub mod file;
pub mod folder;
pub mod form;
pub mod form_response;
pub mod identity;
pub mod link;
pub mod notification;
pub mod testimonial;
pub mod user;

pub use blog::BlogRepository;
pub use contact::ContactRepository;
pub use file::{FileFilter, FileRepository};
pub use folder::FolderRepository;
pub use form::FormRepository;
pub use form_response::FormResponseRepository;
pub use identity::IdentityRepository;
pub use link::LinkRepository;
pub use notification::NotificationRepository;
pub use testimonial::TestimonialRepository;
pub use user::UserRepository;
