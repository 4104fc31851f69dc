//! Unified error codes for the reservation platform
//!
//! This module defines all error codes used across the server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Restaurant errors
//! - 4xxx: Reservation / booking policy errors
//! - 7xxx: Table, zone and shift errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 3xxx: Restaurant ====================
    /// Restaurant not found
    RestaurantNotFound = 3001,

    // ==================== 4xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 4001,
    /// Reservation no longer holds seats (cancelled, completed...)
    ReservationNotActive = 4002,
    /// Requested time is not one of the shift's slots
    SlotNotOffered = 4003,
    /// Party size must be positive
    InvalidPartySize = 4004,
    /// Party size above the restaurant maximum
    PartySizeExceeded = 4005,
    /// Party size above the online booking cap
    OnlinePartySizeExceeded = 4006,
    /// Slot is inside the booking cutoff window
    BookingCutoff = 4007,
    /// Restaurant closed on the requested day
    ClosedDay = 4008,
    /// Shift does not run on the requested day
    ShiftNotServing = 4009,
    /// No table combination covers the party
    CapacityInfeasible = 4010,
    /// Shift concurrent guest cap reached
    ShiftCapacityExceeded = 4011,
    /// Overlaps another active reservation
    ReservationConflict = 4012,

    // ==================== 7xxx: Table ====================
    /// Table not found
    TableNotFound = 7001,
    /// Table is blocked, unavailable or inactive
    TableNotEligible = 7003,
    /// Zone not found
    ZoneNotFound = 7101,
    /// Shift not found
    ShiftNotFound = 7201,
    /// Shift start/end time malformed or inverted
    ShiftInvalidTime = 7202,
    /// Shift slot interval or timing not positive
    ShiftInvalidInterval = 7203,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidFormat => "Invalid format",

            // Restaurant
            ErrorCode::RestaurantNotFound => "Restaurant not found",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::ReservationNotActive => "Reservation is no longer active",
            ErrorCode::SlotNotOffered => "Time is not a bookable slot of this shift",
            ErrorCode::InvalidPartySize => "Party size must be at least 1",
            ErrorCode::PartySizeExceeded => "Party size exceeds the restaurant maximum",
            ErrorCode::OnlinePartySizeExceeded => "Party size exceeds the online booking limit",
            ErrorCode::BookingCutoff => "Slot is too close to book",
            ErrorCode::ClosedDay => "Restaurant is closed on this day",
            ErrorCode::ShiftNotServing => "Shift does not run on this day",
            ErrorCode::CapacityInfeasible => "No combination of tables covers the party",
            ErrorCode::ShiftCapacityExceeded => "Shift capacity reached for this slot",
            ErrorCode::ReservationConflict => "Overlaps another reservation",

            // Table
            ErrorCode::TableNotFound => "Table not found",
            ErrorCode::TableNotEligible => "Table is blocked or unavailable",
            ErrorCode::ZoneNotFound => "Zone not found",
            ErrorCode::ShiftNotFound => "Shift not found",
            ErrorCode::ShiftInvalidTime => "Shift time is invalid",
            ErrorCode::ShiftInvalidInterval => "Shift interval is invalid",

            // System
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            6 => Ok(ErrorCode::InvalidFormat),

            // Restaurant
            3001 => Ok(ErrorCode::RestaurantNotFound),

            // Reservation
            4001 => Ok(ErrorCode::ReservationNotFound),
            4002 => Ok(ErrorCode::ReservationNotActive),
            4003 => Ok(ErrorCode::SlotNotOffered),
            4004 => Ok(ErrorCode::InvalidPartySize),
            4005 => Ok(ErrorCode::PartySizeExceeded),
            4006 => Ok(ErrorCode::OnlinePartySizeExceeded),
            4007 => Ok(ErrorCode::BookingCutoff),
            4008 => Ok(ErrorCode::ClosedDay),
            4009 => Ok(ErrorCode::ShiftNotServing),
            4010 => Ok(ErrorCode::CapacityInfeasible),
            4011 => Ok(ErrorCode::ShiftCapacityExceeded),
            4012 => Ok(ErrorCode::ReservationConflict),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),
            7003 => Ok(ErrorCode::TableNotEligible),
            7101 => Ok(ErrorCode::ZoneNotFound),
            7201 => Ok(ErrorCode::ShiftNotFound),
            7202 => Ok(ErrorCode::ShiftInvalidTime),
            7203 => Ok(ErrorCode::ShiftInvalidInterval),

            // System
            9001 => Ok(ErrorCode::InternalError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
