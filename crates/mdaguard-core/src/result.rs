//! Convenience result type alias for mdaGuard.

use crate::error::AppError;

/// A specialized `Result` type for mdaGuard operations.
pub type AppResult<T> = Result<T, AppError>;
