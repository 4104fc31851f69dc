//! Shared types for the reservation platform
//!
//! Domain models and the unified error system used by the reservation
//! server and every client talking to its API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCategory, ErrorCode, ErrorResponse};
