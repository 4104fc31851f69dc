//! Shift Model (service periods)

use serde::{Deserialize, Serialize};

/// Service shift - a named period (lunch, dinner) with its own slot cadence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    /// Opening time (HH:MM, restaurant local time)
    pub start_time: String,
    /// Closing time (HH:MM, restaurant local time)
    pub end_time: String,
    /// Distance between two bookable slots
    pub slot_interval_minutes: i32,
    /// Expected seated duration
    pub default_dwell_minutes: i32,
    /// Turnover margin, applied before and after the dwell
    #[serde(default)]
    pub default_buffer_minutes: i32,
    /// Cap on guests seated concurrently across all tables
    pub max_capacity: Option<i32>,
    /// Weekdays served, 0 = Sunday .. 6 = Saturday
    #[serde(default)]
    pub days_of_week: Vec<u8>,
    pub is_active: bool,
}

impl Shift {
    /// Whether this shift serves the given weekday (0 = Sunday)
    pub fn runs_on(&self, weekday: u8) -> bool {
        self.is_active && self.days_of_week.contains(&weekday)
    }
}

/// Create shift payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCreate {
    pub name: String,
    pub start_time: String,
    pub end_time: String,
    pub slot_interval_minutes: i32,
    pub default_dwell_minutes: i32,
    #[serde(default)]
    pub default_buffer_minutes: i32,
    pub max_capacity: Option<i32>,
    #[serde(default)]
    pub days_of_week: Vec<u8>,
}

/// Update shift payload
///
/// Dwell/buffer edits apply to every later allocation decision; stored
/// reservations are not rewritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShiftUpdate {
    pub name: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub slot_interval_minutes: Option<i32>,
    pub default_dwell_minutes: Option<i32>,
    pub default_buffer_minutes: Option<i32>,
    /// `null` removes the cap, an absent field keeps it
    #[serde(
        default,
        deserialize_with = "super::serde_helpers::nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_capacity: Option<Option<i32>>,
    pub days_of_week: Option<Vec<u8>>,
    pub is_active: Option<bool>,
}
