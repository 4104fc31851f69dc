//! Occupancy Index
//!
//! Per-table list of occupied intervals for one date and shift, built from
//! the active (pending/confirmed) reservations of a snapshot.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::models::{DiningTable, Reservation};

use super::error::AllocationError;
use super::interval::{Minutes, OccupiedInterval, parse_hhmm};
use super::timing::ShiftTiming;

/// One reservation's hold on the tables it is linked to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupiedEntry {
    pub reservation_id: i64,
    pub slot: Minutes,
    pub party_size: i32,
    pub interval: OccupiedInterval,
}

#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    by_table: HashMap<i64, Vec<OccupiedEntry>>,
    entries: Vec<OccupiedEntry>,
}

impl OccupancyIndex {
    /// Index every active reservation of `date` in the timing's shift
    pub fn build(
        reservations: &[Reservation],
        date: NaiveDate,
        timing: &ShiftTiming,
    ) -> Result<Self, AllocationError> {
        Self::build_inner(reservations, date, timing, None)
    }

    /// Same as [`build`](Self::build) with one reservation left out, so a
    /// reservation being re-validated never conflicts with itself
    pub fn build_excluding(
        reservations: &[Reservation],
        date: NaiveDate,
        timing: &ShiftTiming,
        exclude_id: i64,
    ) -> Result<Self, AllocationError> {
        Self::build_inner(reservations, date, timing, Some(exclude_id))
    }

    fn build_inner(
        reservations: &[Reservation],
        date: NaiveDate,
        timing: &ShiftTiming,
        exclude_id: Option<i64>,
    ) -> Result<Self, AllocationError> {
        let mut index = Self::default();

        for r in reservations {
            if r.date != date
                || r.shift_id != timing.shift_id
                || !r.status.occupies_seats()
                || Some(r.id) == exclude_id
            {
                continue;
            }

            let slot = parse_hhmm(&r.slot_time)?;
            let entry = OccupiedEntry {
                reservation_id: r.id,
                slot,
                party_size: r.party_size,
                interval: OccupiedInterval::around_slot(slot, timing),
            };
            for table_id in &r.linked_tables {
                index
                    .by_table
                    .entry(*table_id)
                    .or_default()
                    .push(entry.clone());
            }
            index.entries.push(entry);
        }

        for list in index.by_table.values_mut() {
            list.sort_by_key(|e| (e.interval.start, e.reservation_id));
        }

        Ok(index)
    }

    /// Occupied intervals of a table, ordered by start
    pub fn intervals(&self, table_id: i64) -> &[OccupiedEntry] {
        self.by_table.get(&table_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_table_free_at(&self, table_id: i64, candidate: &OccupiedInterval) -> bool {
        self.conflict_on(table_id, candidate).is_none()
    }

    /// Earliest reservation on `table_id` whose interval overlaps `candidate`
    pub fn conflict_on(
        &self,
        table_id: i64,
        candidate: &OccupiedInterval,
    ) -> Option<&OccupiedEntry> {
        self.intervals(table_id)
            .iter()
            .find(|e| e.interval.overlaps(candidate))
    }

    /// Subset of `tables` free at `candidate`, input order preserved
    pub fn free_tables<'a>(
        &self,
        tables: &[&'a DiningTable],
        candidate: &OccupiedInterval,
    ) -> Vec<&'a DiningTable> {
        tables
            .iter()
            .copied()
            .filter(|t| self.is_table_free_at(t.id, candidate))
            .collect()
    }

    /// Guests of every indexed reservation seated during `candidate`
    pub fn seated_party_total(&self, candidate: &OccupiedInterval) -> i32 {
        self.entries
            .iter()
            .filter(|e| e.interval.overlaps(candidate))
            .map(|e| e.party_size)
            .sum()
    }

    pub fn reservation_count(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ReservationStatus, TableStatus};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn reservation(id: i64, slot: &str, tables: &[i64], status: ReservationStatus) -> Reservation {
        Reservation {
            id,
            restaurant_id: 1,
            date: date(),
            shift_id: 1,
            slot_time: slot.to_string(),
            party_size: 2,
            table_id: tables[0],
            linked_tables: tables.to_vec(),
            status,
            zone_id: None,
            guest_name: format!("Guest {}", id),
            guest_phone: None,
            note: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn table(id: i64) -> DiningTable {
        DiningTable {
            id,
            restaurant_id: 1,
            name: format!("T{}", id),
            seats: 4,
            zone_id: None,
            status: TableStatus::Available,
            is_active: true,
            display_order: 0,
        }
    }

    #[test]
    fn test_build_indexes_every_linked_table() {
        let timing = ShiftTiming::for_tests(1080, 1320, 30, 90, 15);
        let rs = vec![reservation(1, "19:00", &[10, 11], ReservationStatus::Confirmed)];
        let index = OccupancyIndex::build(&rs, date(), &timing).unwrap();

        assert_eq!(index.intervals(10).len(), 1);
        assert_eq!(index.intervals(11).len(), 1);
        assert_eq!(
            index.intervals(10)[0].interval,
            OccupiedInterval::new(1125, 1245)
        );
        assert!(index.intervals(12).is_empty());
    }

    #[test]
    fn test_inactive_and_foreign_reservations_are_ignored() {
        let timing = ShiftTiming::for_tests(1080, 1320, 30, 90, 15);
        let mut other_day = reservation(4, "19:00", &[10], ReservationStatus::Pending);
        other_day.date = date().succ_opt().unwrap();
        let mut other_shift = reservation(5, "19:00", &[10], ReservationStatus::Pending);
        other_shift.shift_id = 2;
        let rs = vec![
            reservation(1, "19:00", &[10], ReservationStatus::Cancelled),
            reservation(2, "19:00", &[10], ReservationStatus::NoShow),
            reservation(3, "19:00", &[10], ReservationStatus::Completed),
            other_day,
            other_shift,
        ];
        let index = OccupancyIndex::build(&rs, date(), &timing).unwrap();
        assert_eq!(index.reservation_count(), 0);
    }

    #[test]
    fn test_build_excluding_drops_own_footprint() {
        let timing = ShiftTiming::for_tests(1080, 1320, 30, 90, 15);
        let rs = vec![
            reservation(1, "19:00", &[10], ReservationStatus::Confirmed),
            reservation(2, "21:00", &[10], ReservationStatus::Confirmed),
        ];
        let index = OccupancyIndex::build_excluding(&rs, date(), &timing, 1).unwrap();
        assert_eq!(index.intervals(10).len(), 1);
        assert_eq!(index.intervals(10)[0].reservation_id, 2);
    }

    #[test]
    fn test_is_table_free_at_honours_buffer() {
        // 19:00 with 90 dwell and 15 buffer holds [18:45, 20:45)
        let timing = ShiftTiming::for_tests(1080, 1320, 30, 90, 15);
        let rs = vec![reservation(1, "19:00", &[10], ReservationStatus::Confirmed)];
        let index = OccupancyIndex::build(&rs, date(), &timing).unwrap();

        let at_2030 = OccupiedInterval::around_slot(1230, &timing);
        let at_2100 = OccupiedInterval::around_slot(1260, &timing);
        assert!(!index.is_table_free_at(10, &at_2030));
        // [20:45, 22:45) touches [18:45, 20:45) only at the endpoint
        assert!(index.is_table_free_at(10, &at_2100));
        assert!(index.is_table_free_at(11, &at_2030));
    }

    #[test]
    fn test_free_tables_and_seated_total() {
        let timing = ShiftTiming::for_tests(1080, 1320, 30, 90, 0);
        let rs = vec![
            reservation(1, "19:00", &[1], ReservationStatus::Confirmed),
            reservation(2, "19:30", &[2], ReservationStatus::Pending),
        ];
        let index = OccupancyIndex::build(&rs, date(), &timing).unwrap();
        let tables = [table(1), table(2), table(3)];
        let refs: Vec<&DiningTable> = tables.iter().collect();

        let candidate = OccupiedInterval::around_slot(1170, &timing);
        let free: Vec<i64> = index.free_tables(&refs, &candidate).iter().map(|t| t.id).collect();
        assert_eq!(free, vec![3]);
        assert_eq!(index.seated_party_total(&candidate), 4);

        let late = OccupiedInterval::around_slot(1290, &timing);
        assert_eq!(index.seated_party_total(&late), 0);
    }

    #[test]
    fn test_malformed_slot_time_is_a_configuration_error() {
        let timing = ShiftTiming::for_tests(1080, 1320, 30, 90, 0);
        let rs = vec![reservation(1, "7pm", &[1], ReservationStatus::Confirmed)];
        assert_eq!(
            OccupancyIndex::build(&rs, date(), &timing).unwrap_err(),
            AllocationError::InvalidTime("7pm".to_string())
        );
    }
}
