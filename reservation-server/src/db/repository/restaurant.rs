//! Restaurant Repository

use super::{RepoError, RepoResult};
use crate::db::DataStore;
use shared::models::{Restaurant, RestaurantCreate};

pub fn find_all(store: &DataStore) -> Vec<Restaurant> {
    store.restaurants.values().cloned().collect()
}

pub fn find_by_id(store: &DataStore, id: i64) -> Option<Restaurant> {
    store.restaurants.get(&id).cloned()
}

fn validate_policy(r: &Restaurant) -> RepoResult<()> {
    if r.booking_cutoff_hours < 0 {
        return Err(RepoError::Validation(format!(
            "booking_cutoff_hours cannot be negative: {}",
            r.booking_cutoff_hours
        )));
    }
    if r.max_party_size < 1 {
        return Err(RepoError::Validation(format!(
            "max_party_size must be positive: {}",
            r.max_party_size
        )));
    }
    if r.max_online_party_size < 1 || r.max_online_party_size > r.max_party_size {
        return Err(RepoError::Validation(format!(
            "max_online_party_size must be between 1 and {} (got {})",
            r.max_party_size, r.max_online_party_size
        )));
    }
    Ok(())
}

pub fn create(store: &mut DataStore, data: RestaurantCreate) -> RepoResult<Restaurant> {
    if store.restaurants.values().any(|r| r.name == data.name) {
        return Err(RepoError::Duplicate(format!(
            "Restaurant '{}' already exists",
            data.name
        )));
    }

    let restaurant = data.into_restaurant(shared::util::snowflake_id(), shared::util::now_millis());
    validate_policy(&restaurant)?;

    store.restaurants.insert(restaurant.id, restaurant.clone());
    Ok(restaurant)
}
