//! User profile and admin user management services.

pub mod admin;
pub mod service;

pub use admin::{AdminUpdateUserRequest, AdminUserService, CreateUserRequest, CreatedUser};
pub use service::{UpdateProfileRequest, UserService};
