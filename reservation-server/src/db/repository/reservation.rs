//! Reservation Repository
//!
//! Every write of an active reservation passes the overlap guard: no table
//! may carry two active reservations whose occupied intervals overlap on the
//! same date, whichever shifts they were booked in. The guard runs inside the caller's transaction, so
//! of two racing writers only the first one commits.

use chrono::NaiveDate;
use shared::models::{Reservation, ReservationStatus};

use super::{RepoError, RepoResult};
use crate::allocation::{OccupancyIndex, OccupiedInterval, ShiftTiming, format_hhmm, parse_hhmm};
use crate::db::DataStore;

pub fn find_by_id(store: &DataStore, id: i64) -> Option<Reservation> {
    store.reservations.get(&id).cloned()
}

/// All reservations of a day, by slot time
pub fn find_by_date(store: &DataStore, restaurant_id: i64, date: NaiveDate) -> Vec<Reservation> {
    let mut list: Vec<Reservation> = store
        .reservations
        .values()
        .filter(|r| r.restaurant_id == restaurant_id && r.date == date)
        .cloned()
        .collect();
    list.sort_by(|a, b| a.slot_time.cmp(&b.slot_time).then(a.id.cmp(&b.id)));
    list
}

/// Reservations of one date and shift, any status
pub fn find_for_shift(
    store: &DataStore,
    restaurant_id: i64,
    date: NaiveDate,
    shift_id: i64,
) -> Vec<Reservation> {
    store
        .reservations
        .values()
        .filter(|r| r.restaurant_id == restaurant_id && r.date == date && r.shift_id == shift_id)
        .cloned()
        .collect()
}

fn ensure_no_overlap(store: &DataStore, r: &Reservation) -> RepoResult<()> {
    if !r.status.occupies_seats() {
        return Ok(());
    }

    let shift = store
        .shifts
        .get(&r.shift_id)
        .filter(|s| s.restaurant_id == r.restaurant_id)
        .ok_or_else(|| RepoError::NotFound(format!("Shift {} not found", r.shift_id)))?;
    let timing = ShiftTiming::from_shift(shift).map_err(|e| RepoError::Validation(e.to_string()))?;

    let mut seats = 0;
    for table_id in &r.linked_tables {
        let table = store
            .tables
            .get(table_id)
            .filter(|t| t.restaurant_id == r.restaurant_id)
            .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", table_id)))?;
        seats += table.seats;
    }
    if seats < r.party_size {
        return Err(RepoError::Validation(format!(
            "Tables seat {} guests, party is {}",
            seats, r.party_size
        )));
    }

    let slot = parse_hhmm(&r.slot_time).map_err(|e| RepoError::Validation(e.to_string()))?;
    let window = OccupiedInterval::around_slot(slot, &timing);

    // Each shift of the day holds its tables with its own dwell and buffer
    let mut shift_ids: Vec<i64> = store
        .reservations
        .values()
        .filter(|o| {
            o.restaurant_id == r.restaurant_id && o.date == r.date && o.status.occupies_seats()
        })
        .map(|o| o.shift_id)
        .collect();
    shift_ids.sort_unstable();
    shift_ids.dedup();

    for shift_id in shift_ids {
        let shift_timing = if shift_id == r.shift_id {
            timing.clone()
        } else {
            let other = store
                .shifts
                .get(&shift_id)
                .ok_or_else(|| RepoError::NotFound(format!("Shift {} not found", shift_id)))?;
            ShiftTiming::from_shift(other).map_err(|e| RepoError::Validation(e.to_string()))?
        };
        let held = find_for_shift(store, r.restaurant_id, r.date, shift_id);
        let index = OccupancyIndex::build_excluding(&held, r.date, &shift_timing, r.id)
            .map_err(|e| RepoError::Validation(e.to_string()))?;

        for table_id in &r.linked_tables {
            if let Some(entry) = index.conflict_on(*table_id, &window) {
                tracing::warn!(
                    reservation_id = r.id,
                    table_id,
                    conflicting_reservation = entry.reservation_id,
                    "Rejected overlapping reservation write"
                );
                return Err(RepoError::Conflict(format!(
                    "Table {} is already held by the {} reservation until {}",
                    table_name(store, *table_id),
                    format_hhmm(entry.slot),
                    format_hhmm(entry.interval.end)
                )));
            }
        }
    }
    Ok(())
}

fn table_name(store: &DataStore, id: i64) -> String {
    store
        .tables
        .get(&id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| id.to_string())
}

/// Store a new reservation (normalized, guarded)
pub fn insert(store: &mut DataStore, mut reservation: Reservation) -> RepoResult<Reservation> {
    if store.reservations.contains_key(&reservation.id) {
        return Err(RepoError::Duplicate(format!(
            "Reservation {} already exists",
            reservation.id
        )));
    }
    if reservation.party_size < 1 {
        return Err(RepoError::Validation(format!(
            "Party size must be positive: {}",
            reservation.party_size
        )));
    }
    reservation.normalize_linked_tables();
    ensure_no_overlap(store, &reservation)?;

    let now = shared::util::now_millis();
    reservation.created_at = Some(now);
    reservation.updated_at = Some(now);
    store.reservations.insert(reservation.id, reservation.clone());
    Ok(reservation)
}

/// Replace the table assignment; `table_ids[0]` becomes the primary table
pub fn update_tables(
    store: &mut DataStore,
    id: i64,
    party_size: i32,
    table_ids: Vec<i64>,
) -> RepoResult<Reservation> {
    let mut reservation = find_by_id(store, id)
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;
    let primary = *table_ids
        .first()
        .ok_or_else(|| RepoError::Validation("At least one table is required".to_string()))?;
    if party_size < 1 {
        return Err(RepoError::Validation(format!(
            "Party size must be positive: {}",
            party_size
        )));
    }

    reservation.party_size = party_size;
    reservation.table_id = primary;
    reservation.linked_tables = table_ids;
    reservation.normalize_linked_tables();
    ensure_no_overlap(store, &reservation)?;

    reservation.updated_at = Some(shared::util::now_millis());
    store.reservations.insert(id, reservation.clone());
    Ok(reservation)
}

/// Move a reservation to another date/shift/slot with a new table assignment
pub fn update_schedule(
    store: &mut DataStore,
    id: i64,
    date: NaiveDate,
    shift_id: i64,
    slot_time: String,
    table_ids: Vec<i64>,
) -> RepoResult<Reservation> {
    let mut reservation = find_by_id(store, id)
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;
    let primary = *table_ids
        .first()
        .ok_or_else(|| RepoError::Validation("At least one table is required".to_string()))?;

    reservation.date = date;
    reservation.shift_id = shift_id;
    reservation.slot_time = slot_time;
    reservation.table_id = primary;
    reservation.linked_tables = table_ids;
    reservation.normalize_linked_tables();
    ensure_no_overlap(store, &reservation)?;

    reservation.updated_at = Some(shared::util::now_millis());
    store.reservations.insert(id, reservation.clone());
    Ok(reservation)
}

/// Reactivating a cancelled/no-show reservation re-runs the overlap guard
pub fn update_status(
    store: &mut DataStore,
    id: i64,
    status: ReservationStatus,
) -> RepoResult<Reservation> {
    let mut reservation = find_by_id(store, id)
        .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))?;
    let was_active = reservation.status.occupies_seats();

    reservation.status = status;
    if !was_active {
        ensure_no_overlap(store, &reservation)?;
    }

    reservation.updated_at = Some(shared::util::now_millis());
    store.reservations.insert(id, reservation.clone());
    Ok(reservation)
}
