//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::allocation::{DropCheck, ReallocationOutcome};
use crate::core::ServerState;
use crate::services::{AppliedReallocation, SlotRequest, ValidationResult};
use crate::utils::time;
use crate::utils::{AppError, AppResult};
use shared::models::{Reservation, ReservationCreate, ReservationStatus};

/// Query params for listing reservations
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// YYYY-MM-DD
    pub date: String,
}

/// Status change payload; the status string is matched case-insensitively
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Party size change and/or move to another table
#[derive(Debug, Deserialize)]
pub struct ReallocationRequest {
    pub party_size: i32,
    pub table_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DropRequest {
    pub table_id: i64,
}

/// Move to another date / shift / slot
#[derive(Debug, Deserialize)]
pub struct ScheduleUpdate {
    /// YYYY-MM-DD
    pub date: String,
    pub shift_id: i64,
    pub slot_time: String,
}

/// GET /api/restaurants/:id/reservations?date= - 某日预订列表
pub async fn list(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let date = time::parse_date(&query.date)?;
    let reservations = state.booking.list_reservations(restaurant_id, date)?;
    Ok(Json(reservations))
}

/// POST /api/restaurants/:id/reservations/validate - 提交前校验
pub async fn validate(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    Json(payload): Json<SlotRequest>,
) -> AppResult<Json<ValidationResult>> {
    let result = state
        .booking
        .validate_reservation(restaurant_id, &payload, chrono::Utc::now())?;
    Ok(Json(result))
}

/// POST /api/restaurants/:id/reservations - 创建预订
pub async fn create(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let created = state
        .booking
        .create_reservation(restaurant_id, payload, chrono::Utc::now())?;
    Ok(Json(created))
}

/// PUT /api/restaurants/:id/reservations/:rid/status - 修改预订状态
pub async fn update_status(
    State(state): State<ServerState>,
    Path((restaurant_id, reservation_id)): Path<(i64, i64)>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Reservation>> {
    let status = payload
        .status
        .parse::<ReservationStatus>()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let updated = state
        .booking
        .update_status(restaurant_id, reservation_id, status)?;
    Ok(Json(updated))
}

/// PUT /api/restaurants/:id/reservations/:rid/schedule - 改期
pub async fn reschedule(
    State(state): State<ServerState>,
    Path((restaurant_id, reservation_id)): Path<(i64, i64)>,
    Json(payload): Json<ScheduleUpdate>,
) -> AppResult<Json<Reservation>> {
    let date = time::parse_date(&payload.date)?;
    let moved = state.booking.reschedule_reservation(
        restaurant_id,
        reservation_id,
        date,
        payload.shift_id,
        &payload.slot_time,
        chrono::Utc::now(),
    )?;
    Ok(Json(moved))
}

/// POST /api/restaurants/:id/reservations/:rid/reallocation - 重新分配预检
///
/// 不写入任何数据；被拒绝时返回 `success: false` 和原因
pub async fn check_reallocation(
    State(state): State<ServerState>,
    Path((restaurant_id, reservation_id)): Path<(i64, i64)>,
    Json(payload): Json<ReallocationRequest>,
) -> AppResult<Json<ReallocationOutcome>> {
    let outcome = state.booking.revalidate_reallocation(
        restaurant_id,
        reservation_id,
        payload.party_size,
        payload.table_id,
    )?;
    Ok(Json(outcome))
}

/// PUT /api/restaurants/:id/reservations/:rid/reallocation - 重新分配并写入
pub async fn apply_reallocation(
    State(state): State<ServerState>,
    Path((restaurant_id, reservation_id)): Path<(i64, i64)>,
    Json(payload): Json<ReallocationRequest>,
) -> AppResult<Json<AppliedReallocation>> {
    let applied = state.booking.apply_reallocation(
        restaurant_id,
        reservation_id,
        payload.party_size,
        payload.table_id,
    )?;
    Ok(Json(applied))
}

/// POST /api/restaurants/:id/reservations/:rid/drop-check - 拖放到桌台前的冲突检查
pub async fn drop_check(
    State(state): State<ServerState>,
    Path((restaurant_id, reservation_id)): Path<(i64, i64)>,
    Json(payload): Json<DropRequest>,
) -> AppResult<Json<DropCheck>> {
    let check = state
        .booking
        .can_drop_on_table(restaurant_id, reservation_id, payload.table_id)?;
    Ok(Json(check))
}
