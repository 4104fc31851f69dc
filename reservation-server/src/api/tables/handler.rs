//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::services::booking::load_restaurant;
use crate::utils::AppResult;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TABLE_SEATS, validate_optional_text, validate_range, validate_required_text,
};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

/// GET /api/restaurants/:id/tables - 获取餐厅的所有桌台
pub async fn list(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = state.db.read(|store| -> AppResult<Vec<DiningTable>> {
        load_restaurant(store, restaurant_id)?;
        Ok(dining_table::find_by_restaurant(store, restaurant_id))
    })?;
    Ok(Json(tables))
}

/// POST /api/restaurants/:id/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if let Some(seats) = payload.seats {
        validate_range(seats, "seats", 1, MAX_TABLE_SEATS)?;
    }

    let created = state.db.transaction(|tx| -> AppResult<DiningTable> {
        load_restaurant(tx, restaurant_id)?;
        Ok(dining_table::create(tx, restaurant_id, payload)?)
    })?;
    Ok(Json(created))
}

/// PUT /api/restaurants/:id/tables/:table_id - 更新桌台
///
/// 停用或封锁桌台不会改动已有预订，只影响之后的分配
pub async fn update(
    State(state): State<ServerState>,
    Path((restaurant_id, table_id)): Path<(i64, i64)>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    validate_optional_text(&payload.name, "name", MAX_NAME_LEN)?;
    if let Some(seats) = payload.seats {
        validate_range(seats, "seats", 1, MAX_TABLE_SEATS)?;
    }

    let updated = state.db.transaction(|tx| -> AppResult<DiningTable> {
        load_restaurant(tx, restaurant_id)?;
        Ok(dining_table::update(tx, restaurant_id, table_id, payload)?)
    })?;

    tracing::info!(
        restaurant_id,
        table_id,
        status = ?updated.status,
        is_active = updated.is_active,
        "Dining table updated"
    );
    Ok(Json(updated))
}
