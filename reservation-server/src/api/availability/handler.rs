//! Availability API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::services::AvailableSlot;
use crate::utils::AppResult;
use crate::utils::time;
use shared::models::BookingChannel;

/// Query params for the slot list
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// YYYY-MM-DD
    pub date: String,
    pub shift_id: i64,
    pub party_size: i32,
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub channel: BookingChannel,
}

/// GET /api/restaurants/:id/availability - 可订时间点及其桌台组合
pub async fn list(
    State(state): State<ServerState>,
    Path(restaurant_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<AvailableSlot>>> {
    let date = time::parse_date(&query.date)?;
    let slots = state.booking.get_available_slots(
        restaurant_id,
        date,
        query.shift_id,
        query.party_size,
        query.zone_id,
        query.channel,
        chrono::Utc::now(),
    )?;
    Ok(Json(slots))
}
