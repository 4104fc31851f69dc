//! Shift Repository

use super::{RepoError, RepoResult};
use crate::allocation::{OccupiedInterval, ShiftTiming, format_hhmm, generate_slots};
use crate::db::DataStore;
use shared::models::{Shift, ShiftCreate, ShiftUpdate};

pub fn find_by_restaurant(store: &DataStore, restaurant_id: i64) -> Vec<Shift> {
    let mut shifts: Vec<Shift> = store
        .shifts
        .values()
        .filter(|s| s.restaurant_id == restaurant_id)
        .cloned()
        .collect();
    shifts.sort_by(|a, b| a.start_time.cmp(&b.start_time));
    shifts
}

pub fn find_by_id(store: &DataStore, id: i64) -> Option<Shift> {
    store.shifts.get(&id).cloned()
}

/// Span a shift can hold tables for: from the first slot's buffer to the
/// last slot's dwell plus buffer. `None` when the window offers no slot.
fn footprint(timing: &ShiftTiming) -> Option<OccupiedInterval> {
    let first = generate_slots(timing).next()?;
    let last = generate_slots(timing).last()?;
    Some(OccupiedInterval::new(
        first - timing.buffer,
        last + timing.dwell + timing.buffer,
    ))
}

/// Same invariants the engine relies on: parseable times, start < end,
/// positive interval/dwell, weekdays in 0..=6. An active shift also may not
/// reach into another active shift of the restaurant on a shared weekday.
fn validate(store: &DataStore, shift: &Shift) -> RepoResult<()> {
    let timing = ShiftTiming::from_shift(shift).map_err(|e| RepoError::Validation(e.to_string()))?;
    if let Some(day) = shift.days_of_week.iter().find(|d| **d > 6) {
        return Err(RepoError::Validation(format!(
            "Weekday index out of range (0-6): {}",
            day
        )));
    }
    if !shift.is_active {
        return Ok(());
    }
    let Some(own) = footprint(&timing) else {
        return Ok(());
    };

    for other in store.shifts.values() {
        if other.id == shift.id
            || other.restaurant_id != shift.restaurant_id
            || !other.is_active
            || !other.days_of_week.iter().any(|d| shift.runs_on(*d))
        {
            continue;
        }
        let Ok(other_timing) = ShiftTiming::from_shift(other) else {
            continue;
        };
        if let Some(theirs) = footprint(&other_timing)
            && own.overlaps(&theirs)
        {
            return Err(RepoError::Validation(format!(
                "Shift '{}' holds tables {}-{}, overlapping shift '{}' ({}-{})",
                shift.name,
                format_hhmm(own.start),
                format_hhmm(own.end),
                other.name,
                format_hhmm(theirs.start),
                format_hhmm(theirs.end)
            )));
        }
    }
    Ok(())
}

pub fn create(store: &mut DataStore, restaurant_id: i64, data: ShiftCreate) -> RepoResult<Shift> {
    if store
        .shifts
        .values()
        .any(|s| s.restaurant_id == restaurant_id && s.name == data.name)
    {
        return Err(RepoError::Duplicate(format!(
            "Shift '{}' already exists",
            data.name
        )));
    }

    let mut days = data.days_of_week;
    days.sort_unstable();
    days.dedup();

    let shift = Shift {
        id: shared::util::snowflake_id(),
        restaurant_id,
        name: data.name,
        start_time: data.start_time,
        end_time: data.end_time,
        slot_interval_minutes: data.slot_interval_minutes,
        default_dwell_minutes: data.default_dwell_minutes,
        default_buffer_minutes: data.default_buffer_minutes,
        max_capacity: data.max_capacity,
        days_of_week: days,
        is_active: true,
    };
    validate(store, &shift)?;

    store.shifts.insert(shift.id, shift.clone());
    Ok(shift)
}

pub fn update(
    store: &mut DataStore,
    restaurant_id: i64,
    id: i64,
    data: ShiftUpdate,
) -> RepoResult<Shift> {
    let existing = store
        .shifts
        .get(&id)
        .filter(|s| s.restaurant_id == restaurant_id)
        .cloned()
        .ok_or_else(|| RepoError::NotFound(format!("Shift {} not found", id)))?;

    let mut days = data.days_of_week.unwrap_or(existing.days_of_week);
    days.sort_unstable();
    days.dedup();

    let shift = Shift {
        id,
        restaurant_id,
        name: data.name.unwrap_or(existing.name),
        start_time: data.start_time.unwrap_or(existing.start_time),
        end_time: data.end_time.unwrap_or(existing.end_time),
        slot_interval_minutes: data
            .slot_interval_minutes
            .unwrap_or(existing.slot_interval_minutes),
        default_dwell_minutes: data
            .default_dwell_minutes
            .unwrap_or(existing.default_dwell_minutes),
        default_buffer_minutes: data
            .default_buffer_minutes
            .unwrap_or(existing.default_buffer_minutes),
        max_capacity: data.max_capacity.unwrap_or(existing.max_capacity),
        days_of_week: days,
        is_active: data.is_active.unwrap_or(existing.is_active),
    };
    validate(store, &shift)?;

    store.shifts.insert(id, shift.clone());
    Ok(shift)
}
