//! Booking Service - transactional wrapper around the allocation engine
//!
//! Loads a snapshot from [`MemoryDb`], hands it to the engine, and for
//! committing operations performs the engine check and the write inside one
//! transaction. The engine never sees the datastore and never reads the
//! clock; `now` is passed through from the caller.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shared::models::{
    BookingChannel, DiningTable, Reservation, ReservationCreate, ReservationStatus, Restaurant,
    Shift,
};

use crate::allocation::{
    self, AllocationError, BookingPolicy, DropCheck, OccupancyIndex, ReallocationOutcome,
    Rejection, ShiftTiming, SlotOption, TableRef, format_hhmm, parse_hhmm,
};
use crate::db::repository::{dining_table, reservation, restaurant, shift, zone};
use crate::db::{DataStore, MemoryDb};
use crate::utils::time::{local_now, parse_timezone};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

// =============================================================================
// Types
// =============================================================================

/// One entry of the slot list shown by the booking wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableSlot {
    pub time: String,
    pub table_count: usize,
    pub tables: Vec<TableRef>,
    pub total_seats: i32,
}

impl From<SlotOption> for AvailableSlot {
    fn from(option: SlotOption) -> Self {
        Self {
            time: option.time,
            table_count: option.tables.len(),
            tables: option.tables,
            total_seats: option.total_seats,
        }
    }
}

/// Submit-time check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub tables: Vec<TableRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection: Option<Rejection>,
}

impl From<Result<SlotOption, Rejection>> for ValidationResult {
    fn from(result: Result<SlotOption, Rejection>) -> Self {
        match result {
            Ok(option) => Self {
                valid: true,
                tables: option.tables,
                error: None,
                rejection: None,
            },
            Err(rejection) => Self {
                valid: false,
                tables: Vec::new(),
                error: Some(rejection.message()),
                rejection: Some(rejection),
            },
        }
    }
}

/// Submit-time check request
#[derive(Debug, Clone, Deserialize)]
pub struct SlotRequest {
    pub date: NaiveDate,
    pub shift_id: i64,
    pub slot_time: String,
    pub party_size: i32,
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub channel: BookingChannel,
}

/// Committed reallocation
#[derive(Debug, Clone, Serialize)]
pub struct AppliedReallocation {
    pub outcome: ReallocationOutcome,
    pub reservation: Reservation,
}

/// Everything the engine needs for one date and shift
struct ShiftSnapshot {
    restaurant: Restaurant,
    shift: Shift,
    all_shifts: Vec<Shift>,
    timing: ShiftTiming,
    tables: Vec<DiningTable>,
    reservations: Vec<Reservation>,
    date: NaiveDate,
}

impl ShiftSnapshot {
    fn load(store: &DataStore, restaurant_id: i64, date: NaiveDate, shift_id: i64) -> AppResult<Self> {
        let restaurant = load_restaurant(store, restaurant_id)?;
        let shift = shift::find_by_id(store, shift_id)
            .filter(|s| s.restaurant_id == restaurant_id)
            .ok_or(AllocationError::ShiftNotFound(shift_id))?;
        let timing = ShiftTiming::from_shift(&shift)?;

        Ok(Self {
            all_shifts: shift::find_by_restaurant(store, restaurant_id),
            tables: dining_table::find_by_restaurant(store, restaurant_id),
            reservations: reservation::find_for_shift(store, restaurant_id, date, shift_id),
            restaurant,
            shift,
            timing,
            date,
        })
    }

    fn policy(&self) -> BookingPolicy {
        BookingPolicy::from(&self.restaurant)
    }
}

pub(crate) fn load_restaurant(store: &DataStore, restaurant_id: i64) -> AppResult<Restaurant> {
    restaurant::find_by_id(store, restaurant_id).ok_or_else(|| {
        AppError::new(ErrorCode::RestaurantNotFound).with_detail("restaurant_id", restaurant_id)
    })
}

fn load_reservation(store: &DataStore, restaurant_id: i64, id: i64) -> AppResult<Reservation> {
    reservation::find_by_id(store, id)
        .filter(|r| r.restaurant_id == restaurant_id)
        .ok_or_else(|| {
            AppError::new(ErrorCode::ReservationNotFound).with_detail("reservation_id", id)
        })
}

fn ensure_active(r: &Reservation) -> AppResult<()> {
    if !r.status.occupies_seats() {
        return Err(AppError::with_message(
            ErrorCode::ReservationNotActive,
            format!("Reservation {} is {}", r.id, r.status),
        ));
    }
    Ok(())
}

fn ensure_zone(store: &DataStore, restaurant_id: i64, zone_id: Option<i64>) -> AppResult<()> {
    if let Some(id) = zone_id
        && !zone::find_by_id(store, id).is_some_and(|z| z.restaurant_id == restaurant_id)
    {
        return Err(AppError::new(ErrorCode::ZoneNotFound).with_detail("zone_id", id));
    }
    Ok(())
}

// =============================================================================
// BookingService
// =============================================================================

#[derive(Debug, Clone)]
pub struct BookingService {
    db: MemoryDb,
    /// Used when a restaurant's timezone name cannot be parsed
    default_tz: Tz,
}

impl BookingService {
    pub fn new(db: MemoryDb, default_tz: Tz) -> Self {
        Self { db, default_tz }
    }

    fn local_now(&self, restaurant: &Restaurant, now: DateTime<Utc>) -> chrono::NaiveDateTime {
        local_now(now, parse_timezone(&restaurant.timezone, self.default_tz))
    }

    /// Full decision for one slot: request policy, cutoff, packing, capacity
    ///
    /// Outer error = configuration fault, inner error = recoverable refusal.
    #[allow(clippy::too_many_arguments)]
    fn evaluate(
        &self,
        snap: &ShiftSnapshot,
        slot_time: &str,
        party_size: i32,
        zone_id: Option<i64>,
        channel: BookingChannel,
        now: DateTime<Utc>,
        exclude_id: Option<i64>,
    ) -> AppResult<Result<SlotOption, Rejection>> {
        let policy = snap.policy();
        if let Err(rejection) =
            policy.check_request(party_size, channel, snap.date, &snap.shift, &snap.all_shifts)
        {
            return Ok(Err(rejection));
        }

        let slot = parse_hhmm(slot_time).map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Invalid slot time '{}', expected HH:MM", slot_time),
            )
        })?;
        if let Err(rejection) =
            policy.check_cutoff(snap.date, slot, self.local_now(&snap.restaurant, now))
        {
            return Ok(Err(rejection));
        }

        let occupancy = match exclude_id {
            Some(id) => {
                OccupancyIndex::build_excluding(&snap.reservations, snap.date, &snap.timing, id)?
            }
            None => OccupancyIndex::build(&snap.reservations, snap.date, &snap.timing)?,
        };
        let eligible = allocation::eligible_tables(snap.restaurant.id, &snap.tables, zone_id);

        Ok(allocation::check_slot(
            &snap.timing,
            slot,
            party_size,
            &eligible,
            &occupancy,
        ))
    }

    /// Bookable slots for a party, each with the tables it would use
    ///
    /// Request-level refusals (party size caps, closed day) are errors;
    /// slots inside the cutoff window or without a table cover are omitted.
    #[allow(clippy::too_many_arguments)]
    pub fn get_available_slots(
        &self,
        restaurant_id: i64,
        date: NaiveDate,
        shift_id: i64,
        party_size: i32,
        zone_id: Option<i64>,
        channel: BookingChannel,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<AvailableSlot>> {
        self.db.read(|store| {
            ensure_zone(store, restaurant_id, zone_id)?;
            let snap = ShiftSnapshot::load(store, restaurant_id, date, shift_id)?;
            let policy = snap.policy();
            policy.check_request(party_size, channel, date, &snap.shift, &snap.all_shifts)?;

            let local_now = self.local_now(&snap.restaurant, now);
            let occupancy = OccupancyIndex::build(&snap.reservations, date, &snap.timing)?;
            let eligible = allocation::eligible_tables(restaurant_id, &snap.tables, zone_id);

            let slots: Vec<AvailableSlot> =
                allocation::available_slots(&snap.timing, party_size, &eligible, &occupancy)
                    .into_iter()
                    .filter(|option| policy.check_cutoff(date, option.slot, local_now).is_ok())
                    .map(AvailableSlot::from)
                    .collect();

            tracing::debug!(
                restaurant_id,
                shift_id,
                %date,
                party_size,
                slots = slots.len(),
                "Computed available slots"
            );
            Ok(slots)
        })
    }

    /// Submit-time re-check, independent of any slot list the client holds
    pub fn validate_reservation(
        &self,
        restaurant_id: i64,
        req: &SlotRequest,
        now: DateTime<Utc>,
    ) -> AppResult<ValidationResult> {
        self.db.read(|store| {
            ensure_zone(store, restaurant_id, req.zone_id)?;
            let snap = ShiftSnapshot::load(store, restaurant_id, req.date, req.shift_id)?;
            let result = self.evaluate(
                &snap,
                &req.slot_time,
                req.party_size,
                req.zone_id,
                req.channel,
                now,
                None,
            )?;
            Ok(ValidationResult::from(result))
        })
    }

    /// Validate and store a new reservation in one transaction
    ///
    /// Public bookings start `pending`, staff bookings `confirmed`.
    pub fn create_reservation(
        &self,
        restaurant_id: i64,
        data: ReservationCreate,
        now: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        validate_required_text(&data.guest_name, "guest_name", MAX_NAME_LEN)?;
        validate_optional_text(&data.guest_phone, "guest_phone", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.note, "note", MAX_NOTE_LEN)?;

        let created = self.db.transaction(|tx| -> AppResult<Reservation> {
            ensure_zone(tx, restaurant_id, data.zone_id)?;
            let snap = ShiftSnapshot::load(tx, restaurant_id, data.date, data.shift_id)?;
            let option = self
                .evaluate(
                    &snap,
                    &data.slot_time,
                    data.party_size,
                    data.zone_id,
                    data.channel,
                    now,
                    None,
                )?
                .map_err(AppError::from)?;

            let ids = option.table_ids();
            let table_id = *ids
                .first()
                .ok_or_else(|| AppError::internal("Packing returned no tables"))?;
            let status = match data.channel {
                BookingChannel::Public => ReservationStatus::Pending,
                BookingChannel::Staff => ReservationStatus::Confirmed,
            };
            let record = Reservation {
                id: shared::util::snowflake_id(),
                restaurant_id,
                date: data.date,
                shift_id: data.shift_id,
                slot_time: option.time.clone(),
                party_size: data.party_size,
                table_id,
                linked_tables: ids,
                status,
                zone_id: data.zone_id,
                guest_name: data.guest_name.trim().to_string(),
                guest_phone: data.guest_phone.clone(),
                note: data.note.clone(),
                created_at: None,
                updated_at: None,
            };
            Ok(reservation::insert(tx, record)?)
        })?;

        tracing::info!(
            reservation_id = created.id,
            restaurant_id,
            date = %created.date,
            slot = %created.slot_time,
            party_size = created.party_size,
            tables = ?created.linked_tables,
            "Reservation created"
        );
        Ok(created)
    }

    /// Advisory re-pack after a party size change and/or a table move
    pub fn revalidate_reallocation(
        &self,
        restaurant_id: i64,
        reservation_id: i64,
        new_party_size: i32,
        new_table_id: Option<i64>,
    ) -> AppResult<ReallocationOutcome> {
        self.db.read(|store| {
            reallocate(store, restaurant_id, reservation_id, new_party_size, new_table_id)
                .map(|(outcome, _)| outcome)
        })
    }

    /// Re-run the reallocation check and commit it in the same transaction
    pub fn apply_reallocation(
        &self,
        restaurant_id: i64,
        reservation_id: i64,
        new_party_size: i32,
        new_table_id: Option<i64>,
    ) -> AppResult<AppliedReallocation> {
        let applied = self.db.transaction(|tx| -> AppResult<AppliedReallocation> {
            let (outcome, current) =
                reallocate(tx, restaurant_id, reservation_id, new_party_size, new_table_id)?;
            if let Some(rejection) = &outcome.rejection {
                return Err(AppError::from(rejection.clone()));
            }
            let reservation = if outcome.changed || current.party_size != new_party_size {
                reservation::update_tables(tx, reservation_id, new_party_size, outcome.table_ids())?
            } else {
                current
            };
            Ok(AppliedReallocation {
                outcome,
                reservation,
            })
        })?;

        tracing::info!(
            reservation_id,
            party_size = new_party_size,
            tables = ?applied.reservation.linked_tables,
            freed = ?applied.outcome.freed_tables,
            "Reallocation applied"
        );
        Ok(applied)
    }

    /// Advisory drag-and-drop check
    pub fn can_drop_on_table(
        &self,
        restaurant_id: i64,
        reservation_id: i64,
        destination_table_id: i64,
    ) -> AppResult<DropCheck> {
        self.db.read(|store| {
            let current = load_reservation(store, restaurant_id, reservation_id)?;
            ensure_active(&current)?;
            let snap = ShiftSnapshot::load(store, restaurant_id, current.date, current.shift_id)?;
            let check = allocation::can_drop(
                reservation_id,
                destination_table_id,
                &snap.reservations,
                &snap.tables,
                &snap.timing,
            )?;
            tracing::debug!(
                reservation_id,
                destination_table_id,
                can_drop = check.can_drop,
                "Drop check"
            );
            Ok(check)
        })
    }

    /// Move an existing reservation to another date/shift/slot
    ///
    /// Same checks as a staff booking, with the reservation's own footprint
    /// excluded so moving by one slot does not collide with itself.
    pub fn reschedule_reservation(
        &self,
        restaurant_id: i64,
        reservation_id: i64,
        date: NaiveDate,
        shift_id: i64,
        slot_time: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Reservation> {
        let moved = self.db.transaction(|tx| -> AppResult<Reservation> {
            let current = load_reservation(tx, restaurant_id, reservation_id)?;
            ensure_active(&current)?;
            let snap = ShiftSnapshot::load(tx, restaurant_id, date, shift_id)?;
            let option = self
                .evaluate(
                    &snap,
                    slot_time,
                    current.party_size,
                    current.zone_id,
                    BookingChannel::Staff,
                    now,
                    Some(reservation_id),
                )?
                .map_err(AppError::from)?;
            Ok(reservation::update_schedule(
                tx,
                reservation_id,
                date,
                shift_id,
                format_hhmm(option.slot),
                option.table_ids(),
            )?)
        })?;

        tracing::info!(
            reservation_id,
            date = %moved.date,
            slot = %moved.slot_time,
            tables = ?moved.linked_tables,
            "Reservation rescheduled"
        );
        Ok(moved)
    }

    pub fn update_status(
        &self,
        restaurant_id: i64,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        let updated = self.db.transaction(|tx| -> AppResult<Reservation> {
            load_reservation(tx, restaurant_id, reservation_id)?;
            Ok(reservation::update_status(tx, reservation_id, status)?)
        })?;
        tracing::info!(reservation_id, status = %updated.status, "Reservation status updated");
        Ok(updated)
    }

    pub fn list_reservations(&self, restaurant_id: i64, date: NaiveDate) -> AppResult<Vec<Reservation>> {
        self.db.read(|store| {
            load_restaurant(store, restaurant_id)?;
            Ok(reservation::find_by_date(store, restaurant_id, date))
        })
    }
}

/// Shared by the advisory and committing reallocation paths
fn reallocate(
    store: &DataStore,
    restaurant_id: i64,
    reservation_id: i64,
    new_party_size: i32,
    new_table_id: Option<i64>,
) -> AppResult<(ReallocationOutcome, Reservation)> {
    let current = load_reservation(store, restaurant_id, reservation_id)?;
    ensure_active(&current)?;
    let snap = ShiftSnapshot::load(store, restaurant_id, current.date, current.shift_id)?;

    // Staff surface: the general cap applies, the online cap does not
    if new_party_size != current.party_size
        && let Err(rejection) = snap
            .policy()
            .check_party_size(new_party_size, BookingChannel::Staff)
    {
        let previous = current
            .linked_tables
            .iter()
            .map(|id| {
                snap.tables
                    .iter()
                    .find(|t| t.id == *id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| format!("#{}", id))
            })
            .collect();
        return Ok((ReallocationOutcome::rejected(rejection, previous), current));
    }

    let outcome = allocation::revalidate(
        &current,
        new_party_size,
        new_table_id,
        &snap.tables,
        &snap.reservations,
        &snap.timing,
    )?;
    tracing::debug!(
        reservation_id,
        new_party_size,
        ?new_table_id,
        success = outcome.success,
        changed = outcome.changed,
        "Reallocation checked"
    );
    Ok((outcome, current))
}
