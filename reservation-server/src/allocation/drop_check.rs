//! Drag-and-drop conflict check for the table map
//!
//! Strictly advisory: answers whether a reservation may be dropped on a
//! table and which tables it would end up using.

use serde::Serialize;
use shared::models::{DiningTable, Reservation};

use super::error::{AllocationError, Rejection};
use super::interval::{OccupiedInterval, parse_hhmm};
use super::occupancy::OccupancyIndex;
use super::packer::{TableRef, pack_anchored};
use super::pool::eligible_tables;
use super::reallocation::{destination_rejection, find_table, infeasible};
use super::timing::ShiftTiming;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DropCheck {
    pub can_drop: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
    /// Destination first, then any tables joined to seat the party
    pub tables: Vec<TableRef>,
}

impl DropCheck {
    fn rejected(rejection: Rejection) -> Self {
        Self {
            can_drop: false,
            reason: Some(rejection.message()),
            rejection: Some(rejection),
            tables: Vec::new(),
        }
    }
}

pub fn can_drop(
    reservation_id: i64,
    destination_table_id: i64,
    reservations: &[Reservation],
    tables: &[DiningTable],
    timing: &ShiftTiming,
) -> Result<DropCheck, AllocationError> {
    let reservation = reservations
        .iter()
        .find(|r| r.id == reservation_id)
        .ok_or(AllocationError::ReservationNotFound(reservation_id))?;
    let dest = find_table(tables, destination_table_id)?;

    let slot = parse_hhmm(&reservation.slot_time)?;
    let window = OccupiedInterval::around_slot(slot, timing);
    // Own prior tables do not count as occupied by someone else
    let occupancy =
        OccupancyIndex::build_excluding(reservations, reservation.date, timing, reservation.id)?;

    if let Some(rejection) = destination_rejection(dest, &occupancy, &window) {
        return Ok(DropCheck::rejected(rejection));
    }

    if dest.seats >= reservation.party_size {
        return Ok(DropCheck {
            can_drop: true,
            reason: None,
            rejection: None,
            tables: vec![TableRef::from(dest)],
        });
    }

    let eligible = eligible_tables(reservation.restaurant_id, tables, None);
    let free = occupancy.free_tables(&eligible, &window);
    match pack_anchored(reservation.party_size, dest, &free) {
        Ok(packing) => Ok(DropCheck {
            can_drop: true,
            reason: Some(format!(
                "{} seats {}; joined with {}",
                dest.name,
                dest.seats,
                packing.table_names()[1..].join(" + ")
            )),
            rejection: None,
            tables: packing.tables,
        }),
        Err(inf) => Ok(DropCheck::rejected(infeasible(inf))),
    }
}
