//! Repository Module
//!
//! CRUD operations over a [`DataStore`](crate::db::DataStore). Reads take a
//! snapshot (`&DataStore`), writes take the transaction draft
//! (`&mut DataStore`).

pub mod dining_table;
pub mod reservation;
pub mod restaurant;
pub mod shift;
pub mod zone;

use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Write would place two overlapping reservations on one table
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Conflict(msg) => {
                AppError::with_message(ErrorCode::ReservationConflict, msg)
            }
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}
