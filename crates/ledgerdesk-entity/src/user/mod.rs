//! User domain entities.

pub mod identity;
pub mod model;
pub mod role;
pub mod standing;

pub use identity::UserIdentity;
pub use model::{CreateUser, UpdateUser, User};
pub use role::UserRole;
pub use standing::AccountStanding;
