//! Restaurant API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use chrono_tz::Tz;

use crate::core::ServerState;
use crate::db::repository::restaurant;
use crate::services::booking::load_restaurant;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Restaurant, RestaurantCreate};

/// GET /api/restaurants - 获取所有餐厅
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Restaurant>>> {
    let restaurants = state.db.read(restaurant::find_all);
    Ok(Json(restaurants))
}

/// GET /api/restaurants/:id - 获取单个餐厅
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Restaurant>> {
    let restaurant = state.db.read(|store| load_restaurant(store, id))?;
    Ok(Json(restaurant))
}

/// POST /api/restaurants - 创建餐厅
pub async fn create(
    State(state): State<ServerState>,
    Json(mut payload): Json<RestaurantCreate>,
) -> AppResult<Json<Restaurant>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.timezone, "timezone", MAX_SHORT_TEXT_LEN)?;
    if let Some(tz) = &payload.timezone
        && tz.parse::<Tz>().is_err()
    {
        return Err(AppError::validation(format!("Unknown timezone: {}", tz)));
    }
    payload.name = payload.name.trim().to_string();

    let created = state
        .db
        .transaction(|tx| restaurant::create(tx, payload))?;

    tracing::info!(restaurant_id = created.id, name = %created.name, "Restaurant created");
    Ok(Json(created))
}
