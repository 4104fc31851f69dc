//! Unified error handling
//!
//! Re-exports the platform error system from `shared::error`. Handlers
//! return [`AppResult`] and let `?` convert repository and engine errors.
//!
//! # Usage
//!
//! ```ignore
//! Err(AppError::with_message(ErrorCode::ShiftNotFound, format!("Shift {} not found", id)))
//! ```

pub use shared::error::{AppError, ErrorCategory, ErrorCode, ErrorResponse};

pub use super::result::AppResult;
