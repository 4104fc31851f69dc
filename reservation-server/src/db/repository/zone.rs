//! Zone Repository

use super::{RepoError, RepoResult};
use crate::db::DataStore;
use shared::models::{Zone, ZoneCreate};

pub fn find_by_restaurant(store: &DataStore, restaurant_id: i64) -> Vec<Zone> {
    let mut zones: Vec<Zone> = store
        .zones
        .values()
        .filter(|z| z.restaurant_id == restaurant_id)
        .cloned()
        .collect();
    zones.sort_by(|a, b| a.name.cmp(&b.name));
    zones
}

pub fn find_by_id(store: &DataStore, id: i64) -> Option<Zone> {
    store.zones.get(&id).cloned()
}

pub fn create(store: &mut DataStore, restaurant_id: i64, data: ZoneCreate) -> RepoResult<Zone> {
    if store
        .zones
        .values()
        .any(|z| z.restaurant_id == restaurant_id && z.name == data.name)
    {
        return Err(RepoError::Duplicate(format!(
            "Zone '{}' already exists",
            data.name
        )));
    }

    let zone = Zone {
        id: shared::util::snowflake_id(),
        restaurant_id,
        name: data.name,
        description: data.description,
    };
    store.zones.insert(zone.id, zone.clone());
    Ok(zone)
}
