//! Shift API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::shift;
use crate::services::booking::load_restaurant;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_optional_text, validate_required_text, validate_weekdays,
};
use shared::models::{Shift, ShiftCreate, ShiftUpdate};

/// GET /api/restaurants/:id/shifts - 获取餐厅的服务时段
pub async fn list(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<Vec<Shift>>> {
    let shifts = state.db.read(|store| -> AppResult<Vec<Shift>> {
        load_restaurant(store, restaurant_id)?;
        Ok(shift::find_by_restaurant(store, restaurant_id))
    })?;
    Ok(Json(shifts))
}

/// POST /api/restaurants/:id/shifts - 创建服务时段
pub async fn create(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    Json(payload): Json<ShiftCreate>,
) -> AppResult<Json<Shift>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_weekdays(&payload.days_of_week)?;

    let created = state.db.transaction(|tx| -> AppResult<Shift> {
        load_restaurant(tx, restaurant_id)?;
        Ok(shift::create(tx, restaurant_id, payload)?)
    })?;

    tracing::info!(
        restaurant_id,
        shift_id = created.id,
        window = %format!("{}-{}", created.start_time, created.end_time),
        "Shift created"
    );
    Ok(Json(created))
}

/// PUT /api/restaurants/:id/shifts/:shift_id - 更新服务时段
///
/// 停留/缓冲时长的修改只影响之后的分配决策
pub async fn update(
    State(state): State<ServerState>,
    Path((restaurant_id, shift_id)): Path<(i64, i64)>,
    Json(payload): Json<ShiftUpdate>,
) -> AppResult<Json<Shift>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    if let Some(days) = &payload.days_of_week {
        validate_weekdays(days)?;
    }

    let updated = state.db.transaction(|tx| -> AppResult<Shift> {
        load_restaurant(tx, restaurant_id)?;
        Ok(shift::update(tx, restaurant_id, shift_id, payload)?)
    })?;
    Ok(Json(updated))
}
