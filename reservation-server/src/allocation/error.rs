//! Allocation error taxonomy
//!
//! Two kinds of outcome leave the engine:
//!
//! - [`AllocationError`]: configuration faults (missing shift, malformed
//!   times, zero interval). Fatal to the calling operation.
//! - [`Rejection`]: recoverable outcomes (policy, capacity, time conflict).
//!   Returned as data so every caller can render a specific message.

use serde::Serialize;
use shared::error::{AppError, ErrorCode};
use std::fmt;

/// Configuration / input fault that prevents the engine from running
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("Shift {0} not found")]
    ShiftNotFound(i64),

    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    #[error("Shift {shift_id} must start before it ends ({start} - {end})")]
    InvertedWindow {
        shift_id: i64,
        start: String,
        end: String,
    },

    #[error("Shift {shift_id} slot interval must be positive (got {interval})")]
    ZeroInterval { shift_id: i64, interval: i32 },

    #[error("Shift {shift_id} has invalid dwell/buffer ({dwell}/{buffer} minutes)")]
    InvalidTiming {
        shift_id: i64,
        dwell: i32,
        buffer: i32,
    },

    #[error("Reservation {0} not found")]
    ReservationNotFound(i64),

    #[error("Table {0} not found")]
    TableNotFound(i64),
}

impl AllocationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ShiftNotFound(_) => ErrorCode::ShiftNotFound,
            Self::InvalidTime(_) | Self::InvertedWindow { .. } => ErrorCode::ShiftInvalidTime,
            Self::ZeroInterval { .. } | Self::InvalidTiming { .. } => {
                ErrorCode::ShiftInvalidInterval
            }
            Self::ReservationNotFound(_) => ErrorCode::ReservationNotFound,
            Self::TableNotFound(_) => ErrorCode::TableNotFound,
        }
    }
}

impl From<AllocationError> for AppError {
    fn from(err: AllocationError) -> Self {
        AppError::with_message(err.code(), err.to_string())
    }
}

/// Recoverable refusal, always surfaced to the user with its own message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    InvalidPartySize {
        party_size: i32,
    },
    PartySizeExceeded {
        party_size: i32,
        max: i32,
    },
    OnlinePartySizeExceeded {
        party_size: i32,
        max: i32,
    },
    ClosedDay {
        weekday: u8,
    },
    ShiftNotServing {
        shift: String,
        weekday: u8,
    },
    BookingCutoff {
        slot: String,
        cutoff_hours: i32,
    },
    SlotNotOffered {
        slot: String,
    },
    CapacityInfeasible {
        party_size: i32,
        available_seats: i32,
    },
    ShiftCapacityExceeded {
        max_capacity: i32,
        seated: i32,
        party_size: i32,
    },
    Conflict {
        table: String,
        conflicting_slot: String,
        free_at: String,
    },
    TableNotEligible {
        table: String,
    },
}

impl Rejection {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPartySize { .. } => ErrorCode::InvalidPartySize,
            Self::PartySizeExceeded { .. } => ErrorCode::PartySizeExceeded,
            Self::OnlinePartySizeExceeded { .. } => ErrorCode::OnlinePartySizeExceeded,
            Self::ClosedDay { .. } => ErrorCode::ClosedDay,
            Self::ShiftNotServing { .. } => ErrorCode::ShiftNotServing,
            Self::BookingCutoff { .. } => ErrorCode::BookingCutoff,
            Self::SlotNotOffered { .. } => ErrorCode::SlotNotOffered,
            Self::CapacityInfeasible { .. } => ErrorCode::CapacityInfeasible,
            Self::ShiftCapacityExceeded { .. } => ErrorCode::ShiftCapacityExceeded,
            Self::Conflict { .. } => ErrorCode::ReservationConflict,
            Self::TableNotEligible { .. } => ErrorCode::TableNotEligible,
        }
    }

    /// Human-readable message shown to the guest or staff member
    pub fn message(&self) -> String {
        match self {
            Self::InvalidPartySize { party_size } => {
                format!("Party size must be at least 1 (got {})", party_size)
            }
            Self::PartySizeExceeded { party_size, max } => format!(
                "Parties of {} exceed the maximum of {} guests",
                party_size, max
            ),
            Self::OnlinePartySizeExceeded { party_size, max } => format!(
                "Online bookings accept up to {} guests; please call the restaurant for a party of {}",
                max, party_size
            ),
            Self::ClosedDay { weekday } => {
                format!("The restaurant is closed on {}", weekday_name(*weekday))
            }
            Self::ShiftNotServing { shift, weekday } => {
                format!("{} is not served on {}", shift, weekday_name(*weekday))
            }
            Self::BookingCutoff { slot, cutoff_hours } => format!(
                "Bookings for {} close {} hour(s) in advance",
                slot, cutoff_hours
            ),
            Self::SlotNotOffered { slot } => format!("{} is not a bookable time", slot),
            Self::CapacityInfeasible {
                party_size,
                available_seats,
            } => format!(
                "No combination of tables covers {} guests ({} seats free at this time)",
                party_size, available_seats
            ),
            Self::ShiftCapacityExceeded {
                max_capacity,
                seated,
                party_size,
            } => format!(
                "Shift capacity is {} guests and {} are already seated; {} more do not fit",
                max_capacity, seated, party_size
            ),
            Self::Conflict {
                table,
                conflicting_slot,
                free_at,
            } => format!(
                "Table {} is reserved at {}; free again at {}",
                table, conflicting_slot, free_at
            ),
            Self::TableNotEligible { table } => {
                format!("Table {} is blocked or unavailable", table)
            }
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        let mut err = AppError::with_message(rejection.code(), rejection.message());
        if let Ok(serde_json::Value::Object(fields)) = serde_json::to_value(&rejection) {
            for (key, value) in fields {
                err = err.with_detail(key, value);
            }
        }
        err
    }
}

fn weekday_name(weekday: u8) -> &'static str {
    match weekday {
        0 => "Sunday",
        1 => "Monday",
        2 => "Tuesday",
        3 => "Wednesday",
        4 => "Thursday",
        5 => "Friday",
        6 => "Saturday",
        _ => "an unknown day",
    }
}
