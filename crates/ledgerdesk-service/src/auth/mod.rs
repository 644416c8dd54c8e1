//! Sign-in, sign-out, lockout rules, and per-request session checks.

pub mod lockout;
pub mod service;
pub mod session;

pub use lockout::LockoutPolicy;
pub use service::{AuthService, LoginResponse};
pub use session::SessionValidator;
