//! Availability Engine
//!
//! Slot generator × free-table filter × packer. A slot that cannot be packed
//! is simply absent from the output.

use serde::Serialize;
use shared::models::DiningTable;

use super::error::Rejection;
use super::interval::{Minutes, OccupiedInterval, format_hhmm};
use super::occupancy::OccupancyIndex;
use super::packer::{Packing, TableRef, pack};
use super::slots::{generate_slots, is_offered};
use super::timing::ShiftTiming;

/// A bookable slot and the tables that would seat the party
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotOption {
    #[serde(skip)]
    pub slot: Minutes,
    pub time: String,
    pub tables: Vec<TableRef>,
    pub total_seats: i32,
}

impl SlotOption {
    fn new(slot: Minutes, packing: Packing) -> Self {
        Self {
            slot,
            time: format_hhmm(slot),
            tables: packing.tables,
            total_seats: packing.total_seats,
        }
    }

    pub fn table_ids(&self) -> Vec<i64> {
        self.tables.iter().map(|t| t.id).collect()
    }
}

/// Decide one slot: offered by the shift, packable from free tables, within
/// the shift's seated-guest cap
pub fn check_slot(
    timing: &ShiftTiming,
    slot: Minutes,
    party_size: i32,
    eligible: &[&DiningTable],
    occupancy: &OccupancyIndex,
) -> Result<SlotOption, Rejection> {
    if !is_offered(timing, slot) {
        return Err(Rejection::SlotNotOffered {
            slot: format_hhmm(slot),
        });
    }

    let window = OccupiedInterval::around_slot(slot, timing);
    let free = occupancy.free_tables(eligible, &window);
    let packing = pack(party_size, &free).map_err(|inf| Rejection::CapacityInfeasible {
        party_size: inf.party_size,
        available_seats: inf.available_seats,
    })?;

    if let Some(max_capacity) = timing.max_capacity {
        let seated = occupancy.seated_party_total(&window);
        if seated + party_size > max_capacity {
            return Err(Rejection::ShiftCapacityExceeded {
                max_capacity,
                seated,
                party_size,
            });
        }
    }

    Ok(SlotOption::new(slot, packing))
}

/// Every bookable slot of the shift for `party_size`, ascending
///
/// `eligible` comes from [`eligible_tables`](super::pool::eligible_tables)
/// and `occupancy` must be built from the same snapshot.
pub fn available_slots(
    timing: &ShiftTiming,
    party_size: i32,
    eligible: &[&DiningTable],
    occupancy: &OccupancyIndex,
) -> Vec<SlotOption> {
    generate_slots(timing)
        .filter_map(|slot| {
            match check_slot(timing, slot, party_size, eligible, occupancy) {
                Ok(option) => Some(option),
                Err(rejection) => {
                    tracing::trace!(slot = %format_hhmm(slot), %rejection, "Slot skipped");
                    None
                }
            }
        })
        .collect()
}
