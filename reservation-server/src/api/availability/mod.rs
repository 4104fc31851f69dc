//! Availability API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/restaurants/{id}/availability | GET | 某日某时段可订的时间点 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/restaurants/{id}/availability", get(handler::list))
}
