//! # ledgerdesk-service
//!
//! Business logic service layer for LedgerDesk. Each service wraps
//! repository access, enforces authorization via [`RequestContext`],
//! and keeps side effects such as notifications, mail, and object
//! cleanup off the failure path of the operation that triggered them.
//!
//! Services follow constructor injection: all dependencies are
//! provided at construction time via `Arc` references.

pub mod auth;
pub mod blog;
pub mod cleanup;
pub mod contact;
pub mod context;
pub mod file;
pub mod folder;
pub mod form;
pub mod link;
pub mod mail;
pub mod notification;
pub mod testimonial;
pub mod user;

pub use auth::{AuthService, SessionValidator};
pub use blog::BlogService;
pub use contact::ContactService;
pub use context::RequestContext;
pub use file::FileService;
pub use folder::FolderService;
pub use form::{FormBuilderService, FormFillService};
pub use link::LinkService;
pub use notification::NotificationService;
pub use testimonial::TestimonialService;
pub use user::{AdminUserService, UserService};
