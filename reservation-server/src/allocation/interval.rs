//! Interval Model
//!
//! Time-of-day is carried as minutes since local midnight. `HH:MM` strings
//! are parsed once at the call boundary and formatted back only for output.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use super::error::AllocationError;
use super::timing::ShiftTiming;

/// Minutes since local midnight (may be negative once a buffer is applied)
pub type Minutes = i32;

/// Parse `HH:MM` (seconds tolerated) into minutes since midnight
pub fn parse_hhmm(value: &str) -> Result<Minutes, AllocationError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(|t| (t.hour() * 60 + t.minute()) as Minutes)
        .map_err(|_| AllocationError::InvalidTime(value.to_string()))
}

/// Format minutes since midnight as `HH:MM`, wrapping around the day
pub fn format_hhmm(minutes: Minutes) -> String {
    let m = minutes.rem_euclid(24 * 60);
    format!("{:02}:{:02}", m / 60, m % 60)
}

/// Half-open window `[start, end)` during which a table is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OccupiedInterval {
    pub start: Minutes,
    pub end: Minutes,
}

impl OccupiedInterval {
    pub fn new(start: Minutes, end: Minutes) -> Self {
        Self { start, end }
    }

    /// `[slot - buffer, slot + dwell + buffer)` for the shift's current timing
    pub fn around_slot(slot: Minutes, timing: &ShiftTiming) -> Self {
        Self {
            start: slot - timing.buffer,
            end: slot + timing.dwell + timing.buffer,
        }
    }

    /// Touching endpoints do not overlap
    pub fn overlaps(&self, other: &OccupiedInterval) -> bool {
        overlaps(self, other)
    }
}

/// `a.start < b.end && b.start < a.end`
pub fn overlaps(a: &OccupiedInterval, b: &OccupiedInterval) -> bool {
    a.start < b.end && b.start < a.end
}
