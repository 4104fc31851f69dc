//! Shift timing
//!
//! Validated, parsed view of a [`Shift`]'s slot configuration. Built fresh
//! from the shift on every call so edits to dwell/buffer take effect for
//! the next allocation decision.

use shared::models::Shift;

use super::error::AllocationError;
use super::interval::{Minutes, parse_hhmm};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftTiming {
    pub shift_id: i64,
    pub start: Minutes,
    pub end: Minutes,
    pub interval: Minutes,
    pub dwell: Minutes,
    pub buffer: Minutes,
    pub max_capacity: Option<i32>,
}

impl ShiftTiming {
    pub fn from_shift(shift: &Shift) -> Result<Self, AllocationError> {
        let start = parse_hhmm(&shift.start_time)?;
        let end = parse_hhmm(&shift.end_time)?;
        if start >= end {
            return Err(AllocationError::InvertedWindow {
                shift_id: shift.id,
                start: shift.start_time.clone(),
                end: shift.end_time.clone(),
            });
        }
        if shift.slot_interval_minutes <= 0 {
            return Err(AllocationError::ZeroInterval {
                shift_id: shift.id,
                interval: shift.slot_interval_minutes,
            });
        }
        if shift.default_dwell_minutes <= 0 || shift.default_buffer_minutes < 0 {
            return Err(AllocationError::InvalidTiming {
                shift_id: shift.id,
                dwell: shift.default_dwell_minutes,
                buffer: shift.default_buffer_minutes,
            });
        }

        Ok(Self {
            shift_id: shift.id,
            start,
            end,
            interval: shift.slot_interval_minutes,
            dwell: shift.default_dwell_minutes,
            buffer: shift.default_buffer_minutes,
            max_capacity: shift.max_capacity.filter(|c| *c > 0),
        })
    }

    #[cfg(test)]
    pub(crate) fn for_tests(
        start: Minutes,
        end: Minutes,
        interval: Minutes,
        dwell: Minutes,
        buffer: Minutes,
    ) -> Self {
        Self {
            shift_id: 1,
            start,
            end,
            interval,
            dwell,
            buffer,
            max_capacity: None,
        }
    }
}
