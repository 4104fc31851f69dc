//! Input validation helpers
//!
//! Centralized text length constants and validation functions for the
//! configuration payloads (restaurants, shifts, tables, reservations).

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: restaurant, zone, table, shift, guest
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, timezone name
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Largest single table
pub const MAX_TABLE_SEATS: i32 = 50;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate that an integer lies within `[min, max]`.
pub fn validate_range(value: i32, field: &str, min: i32, max: i32) -> Result<(), AppError> {
    if value < min || value > max {
        return Err(AppError::validation(format!(
            "{field} must be between {min} and {max} (got {value})"
        )));
    }
    Ok(())
}

/// Validate weekday indices (0 = Sunday .. 6 = Saturday).
pub fn validate_weekdays(days: &[u8]) -> Result<(), AppError> {
    if let Some(day) = days.iter().find(|d| **d > 6) {
        return Err(AppError::validation(format!(
            "days_of_week contains invalid weekday {day} (expected 0-6)"
        )));
    }
    Ok(())
}
