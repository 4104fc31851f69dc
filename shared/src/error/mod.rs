//! Unified error system
//!
//! This module provides a comprehensive error handling system with:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorResponse`]: JSON body of every failed request
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 3xxx: Restaurant errors
//! - 4xxx: Reservation / booking policy errors
//! - 7xxx: Table, zone and shift errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ErrorResponse};
//!
//! let err = AppError::new(ErrorCode::ShiftNotFound);
//!
//! let err = AppError::with_message(ErrorCode::BookingCutoff, "Bookings close 2h before the slot")
//!     .with_detail("cutoff_hours", 2);
//!
//! let body = ErrorResponse::from(&err);
//! assert_eq!(body.code, 4007);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorResponse};
