//! Convenience result type alias for LedgerDesk.

use crate::error::AppError;

/// A specialized `Result` type for LedgerDesk operations.
pub type AppResult<T> = Result<T, AppError>;
