//! Zone API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::zone;
use crate::services::booking::load_restaurant;
use crate::utils::AppResult;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text};
use shared::models::{Zone, ZoneCreate};

/// GET /api/restaurants/:id/zones - 获取餐厅的所有区域
pub async fn list(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<Vec<Zone>>> {
    let zones = state.db.read(|store| -> AppResult<Vec<Zone>> {
        load_restaurant(store, restaurant_id)?;
        Ok(zone::find_by_restaurant(store, restaurant_id))
    })?;
    Ok(Json(zones))
}

/// POST /api/restaurants/:id/zones - 创建区域
pub async fn create(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    Json(payload): Json<ZoneCreate>,
) -> AppResult<Json<Zone>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;

    let created = state.db.transaction(|tx| -> AppResult<Zone> {
        load_restaurant(tx, restaurant_id)?;
        Ok(zone::create(tx, restaurant_id, payload)?)
    })?;
    Ok(Json(created))
}
