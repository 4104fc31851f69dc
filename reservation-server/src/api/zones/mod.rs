//! Zone API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route(
        "/api/restaurants/{id}/zones",
        get(handler::list).post(handler::create),
    )
}
