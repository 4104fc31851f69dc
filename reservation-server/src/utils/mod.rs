//! Utility module - shared helpers and types
//!
//! # Contents
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`ErrorResponse`] - JSON error body (from shared::error)
//! - logging, time and input validation helpers

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

// Re-export error types from the error module (which re-exports from shared)
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorResponse};
