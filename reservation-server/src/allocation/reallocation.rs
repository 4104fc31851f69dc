//! Reallocation Validator
//!
//! Advisory re-pack of an existing reservation after staff change its party
//! size or move it to another table. The reservation's own footprint is left
//! out of the occupancy index, so it never conflicts with itself. Nothing is
//! written here; the caller commits after confirmation.

use serde::Serialize;
use shared::models::{DiningTable, Reservation};

use super::error::{AllocationError, Rejection};
use super::interval::{OccupiedInterval, format_hhmm, parse_hhmm};
use super::occupancy::OccupancyIndex;
use super::packer::{Infeasible, Packing, TableRef, pack, pack_anchored};
use super::pool::eligible_tables;
use super::timing::ShiftTiming;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReallocationOutcome {
    pub success: bool,
    /// Whether the table assignment differs from the current one
    pub changed: bool,
    pub tables: Vec<TableRef>,
    pub previous_tables: Vec<String>,
    pub freed_tables: Vec<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

impl ReallocationOutcome {
    pub fn rejected(rejection: Rejection, previous_tables: Vec<String>) -> Self {
        Self {
            success: false,
            changed: false,
            tables: Vec::new(),
            previous_tables,
            freed_tables: Vec::new(),
            message: rejection.message(),
            rejection: Some(rejection),
        }
    }

    pub fn table_ids(&self) -> Vec<i64> {
        self.tables.iter().map(|t| t.id).collect()
    }
}

/// Re-validate `reservation` for `new_party_size` and an optional
/// destination table
///
/// `tables` is the restaurant's full table set; `other_active` may include
/// the reservation itself, it is excluded by id.
pub fn revalidate(
    reservation: &Reservation,
    new_party_size: i32,
    new_table_id: Option<i64>,
    tables: &[DiningTable],
    other_active: &[Reservation],
    timing: &ShiftTiming,
) -> Result<ReallocationOutcome, AllocationError> {
    let previous: Vec<String> = reservation
        .linked_tables
        .iter()
        .map(|id| table_name(tables, *id))
        .collect();

    let table_changed = new_table_id.is_some_and(|id| id != reservation.table_id);
    let party_changed = new_party_size != reservation.party_size;

    if !table_changed && !party_changed {
        let current = reservation
            .linked_tables
            .iter()
            .map(|id| find_table(tables, *id).map(TableRef::from))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ReallocationOutcome {
            success: true,
            changed: false,
            tables: current,
            previous_tables: previous,
            freed_tables: Vec::new(),
            message: "No changes to the table assignment".to_string(),
            rejection: None,
        });
    }

    if new_party_size < 1 {
        return Ok(ReallocationOutcome::rejected(
            Rejection::InvalidPartySize {
                party_size: new_party_size,
            },
            previous,
        ));
    }

    let slot = parse_hhmm(&reservation.slot_time)?;
    let window = OccupiedInterval::around_slot(slot, timing);
    let occupancy =
        OccupancyIndex::build_excluding(other_active, reservation.date, timing, reservation.id)?;
    let eligible = eligible_tables(reservation.restaurant_id, tables, None);
    let free = occupancy.free_tables(&eligible, &window);

    let packed = match new_table_id.filter(|_| table_changed) {
        Some(dest_id) => {
            let dest = find_table(tables, dest_id)?;
            if let Some(rejection) = destination_rejection(dest, &occupancy, &window) {
                return Ok(ReallocationOutcome::rejected(rejection, previous));
            }
            pack_anchored(new_party_size, dest, &free)
        }
        None => pack(new_party_size, &free),
    };

    let packing = match packed {
        Ok(packing) => packing,
        Err(inf) => {
            return Ok(ReallocationOutcome::rejected(infeasible(inf), previous));
        }
    };

    if let Some(max_capacity) = timing.max_capacity {
        let seated = occupancy.seated_party_total(&window);
        if seated + new_party_size > max_capacity {
            return Ok(ReallocationOutcome::rejected(
                Rejection::ShiftCapacityExceeded {
                    max_capacity,
                    seated,
                    party_size: new_party_size,
                },
                previous,
            ));
        }
    }

    Ok(accepted(reservation, packing, previous))
}

fn accepted(reservation: &Reservation, packing: Packing, previous: Vec<String>) -> ReallocationOutcome {
    let new_ids = packing.table_ids();
    let changed = new_ids != reservation.linked_tables;
    let freed: Vec<String> = reservation
        .linked_tables
        .iter()
        .zip(previous.iter())
        .filter(|(id, _)| !new_ids.contains(*id))
        .map(|(_, name)| name.clone())
        .collect();

    let message = if changed {
        let mut msg = format!(
            "Reallocated from {} to {}",
            previous.join(" + "),
            packing.table_names().join(" + ")
        );
        if !freed.is_empty() {
            msg.push_str(&format!("; freed {}", freed.join(", ")));
        }
        msg
    } else {
        format!("Current tables still seat {} guests", packing.total_seats)
    };

    ReallocationOutcome {
        success: true,
        changed,
        tables: packing.tables,
        previous_tables: previous,
        freed_tables: freed,
        message,
        rejection: None,
    }
}

/// Eligibility then time-overlap check for a single destination table
pub(crate) fn destination_rejection(
    dest: &DiningTable,
    occupancy: &OccupancyIndex,
    window: &OccupiedInterval,
) -> Option<Rejection> {
    if !dest.is_eligible() {
        return Some(Rejection::TableNotEligible {
            table: dest.name.clone(),
        });
    }
    occupancy
        .conflict_on(dest.id, window)
        .map(|entry| Rejection::Conflict {
            table: dest.name.clone(),
            conflicting_slot: format_hhmm(entry.slot),
            free_at: format_hhmm(entry.interval.end),
        })
}

pub(crate) fn infeasible(inf: Infeasible) -> Rejection {
    Rejection::CapacityInfeasible {
        party_size: inf.party_size,
        available_seats: inf.available_seats,
    }
}

pub(crate) fn find_table(tables: &[DiningTable], id: i64) -> Result<&DiningTable, AllocationError> {
    tables
        .iter()
        .find(|t| t.id == id)
        .ok_or(AllocationError::TableNotFound(id))
}

fn table_name(tables: &[DiningTable], id: i64) -> String {
    tables
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::{ReservationStatus, TableStatus};

    fn table(id: i64, name: &str, seats: i32) -> DiningTable {
        DiningTable {
            id,
            restaurant_id: 1,
            name: name.to_string(),
            seats,
            zone_id: None,
            status: TableStatus::Available,
            is_active: true,
            display_order: id as i32,
        }
    }

    fn reservation(id: i64, slot: &str, party: i32, tables: &[i64]) -> Reservation {
        Reservation {
            id,
            restaurant_id: 1,
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            shift_id: 1,
            slot_time: slot.to_string(),
            party_size: party,
            table_id: tables[0],
            linked_tables: tables.to_vec(),
            status: ReservationStatus::Confirmed,
            zone_id: None,
            guest_name: "Guest".to_string(),
            guest_phone: None,
            note: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn floor() -> Vec<DiningTable> {
        vec![table(1, "A", 2), table(2, "B", 4), table(3, "C", 6)]
    }

    fn timing() -> ShiftTiming {
        ShiftTiming::for_tests(1080, 1320, 30, 90, 15)
    }

    #[test]
    fn test_party_shrink_frees_table() {
        let tables = floor();
        let r = reservation(10, "19:00", 6, &[1, 2]);
        let outcome = revalidate(&r, 2, None, &tables, std::slice::from_ref(&r), &timing()).unwrap();

        assert!(outcome.success);
        assert!(outcome.changed);
        assert_eq!(outcome.table_ids(), vec![1]);
        assert_eq!(outcome.previous_tables, vec!["A", "B"]);
        assert_eq!(outcome.freed_tables, vec!["B"]);
    }

    #[test]
    fn test_no_op_never_rejects_itself() {
        let tables = floor();
        // Table C is taken by someone else; A+B are only held by the reservation itself
        let r = reservation(10, "19:00", 6, &[1, 2]);
        let others = vec![r.clone(), reservation(11, "19:00", 5, &[3])];

        let outcome = revalidate(&r, 6, None, &tables, &others, &timing()).unwrap();
        assert!(outcome.success);
        assert!(!outcome.changed);
        assert_eq!(outcome.table_ids(), r.linked_tables);

        let outcome = revalidate(&r, 6, Some(1), &tables, &others, &timing()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.table_ids(), vec![1, 2]);
    }

    #[test]
    fn test_party_growth_uses_own_tables_again() {
        let tables = floor();
        let r = reservation(10, "19:00", 2, &[1]);
        let others = vec![r.clone(), reservation(11, "19:30", 6, &[3])];

        let outcome = revalidate(&r, 6, None, &tables, &others, &timing()).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.table_ids(), vec![1, 2]);
        assert!(outcome.freed_tables.is_empty());
    }

    #[test]
    fn test_capacity_shortfall_is_reported() {
        let tables = floor();
        let r = reservation(10, "19:00", 2, &[1]);
        let others = vec![reservation(11, "19:30", 6, &[3])];

        let outcome = revalidate(&r, 8, None, &tables, &others, &timing()).unwrap();
        assert!(!outcome.success);
        assert_eq!(
            outcome.rejection,
            Some(Rejection::CapacityInfeasible {
                party_size: 8,
                available_seats: 6
            })
        );
        assert!(outcome.message.contains("8 guests"));
    }

    #[test]
    fn test_move_to_occupied_table_reports_free_again_time() {
        let tables = floor();
        let r = reservation(10, "19:00", 2, &[1]);
        let others = vec![reservation(11, "18:30", 4, &[2])];

        let outcome = revalidate(&r, 2, Some(2), &tables, &others, &timing()).unwrap();
        assert!(!outcome.success);
        assert_eq!(
            outcome.rejection,
            Some(Rejection::Conflict {
                table: "B".to_string(),
                conflicting_slot: "18:30".to_string(),
                free_at: "20:15".to_string(),
            })
        );
    }

    #[test]
    fn test_move_to_small_table_packs_around_it() {
        let tables = floor();
        let r = reservation(10, "19:00", 5, &[3]);
        let outcome = revalidate(&r, 5, Some(1), &tables, std::slice::from_ref(&r), &timing()).unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.table_ids(), vec![1, 2]);
        assert_eq!(outcome.freed_tables, vec!["C"]);
    }

    #[test]
    fn test_move_to_blocked_table_is_rejected() {
        let mut tables = floor();
        tables[1].status = TableStatus::Blocked;
        let r = reservation(10, "19:00", 2, &[1]);
        let outcome = revalidate(&r, 2, Some(2), &tables, &[], &timing()).unwrap();
        assert_eq!(
            outcome.rejection,
            Some(Rejection::TableNotEligible {
                table: "B".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_destination_is_a_configuration_error() {
        let tables = floor();
        let r = reservation(10, "19:00", 2, &[1]);
        assert_eq!(
            revalidate(&r, 2, Some(99), &tables, &[], &timing()),
            Err(AllocationError::TableNotFound(99))
        );
    }
}
