//! Dining Table Repository

use super::{RepoError, RepoResult};
use crate::db::DataStore;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

/// All tables of a restaurant in floor-plan order
pub fn find_by_restaurant(store: &DataStore, restaurant_id: i64) -> Vec<DiningTable> {
    let mut tables: Vec<DiningTable> = store
        .tables
        .values()
        .filter(|t| t.restaurant_id == restaurant_id)
        .cloned()
        .collect();
    tables.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.name.cmp(&b.name))
    });
    tables
}

pub fn find_by_id(store: &DataStore, id: i64) -> Option<DiningTable> {
    store.tables.get(&id).cloned()
}

fn find_by_name(store: &DataStore, restaurant_id: i64, name: &str) -> Option<i64> {
    store
        .tables
        .values()
        .find(|t| t.restaurant_id == restaurant_id && t.name == name)
        .map(|t| t.id)
}

fn validate_zone(store: &DataStore, restaurant_id: i64, zone_id: Option<i64>) -> RepoResult<()> {
    match zone_id {
        Some(id) if !store
            .zones
            .get(&id)
            .is_some_and(|z| z.restaurant_id == restaurant_id) =>
        {
            Err(RepoError::NotFound(format!("Zone {} not found", id)))
        }
        _ => Ok(()),
    }
}

fn validate_seats(seats: i32) -> RepoResult<()> {
    if seats < 1 {
        return Err(RepoError::Validation(format!(
            "Seats must be positive: {}",
            seats
        )));
    }
    Ok(())
}

pub fn create(
    store: &mut DataStore,
    restaurant_id: i64,
    data: DiningTableCreate,
) -> RepoResult<DiningTable> {
    if find_by_name(store, restaurant_id, &data.name).is_some() {
        return Err(RepoError::Duplicate(format!(
            "Table '{}' already exists",
            data.name
        )));
    }
    validate_zone(store, restaurant_id, data.zone_id)?;

    let seats = data.seats.unwrap_or(4);
    validate_seats(seats)?;

    let display_order = data.display_order.unwrap_or_else(|| {
        store
            .tables
            .values()
            .filter(|t| t.restaurant_id == restaurant_id)
            .map(|t| t.display_order + 1)
            .max()
            .unwrap_or(0)
    });

    let table = DiningTable {
        id: shared::util::snowflake_id(),
        restaurant_id,
        name: data.name,
        seats,
        zone_id: data.zone_id,
        status: Default::default(),
        is_active: true,
        display_order,
    };
    store.tables.insert(table.id, table.clone());
    Ok(table)
}

/// Existing reservations keep their tables; the change applies to the next
/// allocation decision
pub fn update(
    store: &mut DataStore,
    restaurant_id: i64,
    id: i64,
    data: DiningTableUpdate,
) -> RepoResult<DiningTable> {
    let existing = store
        .tables
        .get(&id)
        .filter(|t| t.restaurant_id == restaurant_id)
        .cloned()
        .ok_or_else(|| RepoError::NotFound(format!("Dining table {} not found", id)))?;

    if let Some(name) = &data.name
        && find_by_name(store, restaurant_id, name).is_some_and(|found| found != id)
    {
        return Err(RepoError::Duplicate(format!(
            "Table '{}' already exists",
            name
        )));
    }
    if data.zone_id.is_some() {
        validate_zone(store, restaurant_id, data.zone_id)?;
    }
    if let Some(seats) = data.seats {
        validate_seats(seats)?;
    }

    let table = DiningTable {
        id,
        restaurant_id,
        name: data.name.unwrap_or(existing.name),
        seats: data.seats.unwrap_or(existing.seats),
        zone_id: data.zone_id.or(existing.zone_id),
        status: data.status.unwrap_or(existing.status),
        is_active: data.is_active.unwrap_or(existing.is_active),
        display_order: data.display_order.unwrap_or(existing.display_order),
    };
    store.tables.insert(id, table.clone());
    Ok(table)
}
