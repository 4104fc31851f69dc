//! Reservation API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/restaurants/{id}/reservations?date= | GET | 某日预订列表 |
//! | /api/restaurants/{id}/reservations | POST | 创建预订 |
//! | /api/restaurants/{id}/reservations/validate | POST | 提交前校验 |
//! | /api/restaurants/{id}/reservations/{rid}/status | PUT | 修改状态 |
//! | /api/restaurants/{id}/reservations/{rid}/schedule | PUT | 改期 |
//! | /api/restaurants/{id}/reservations/{rid}/reallocation | POST | 重新分配预检 (不写入) |
//! | /api/restaurants/{id}/reservations/{rid}/reallocation | PUT | 重新分配并写入 |
//! | /api/restaurants/{id}/reservations/{rid}/drop-check | POST | 拖放预检 |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants/{id}/reservations", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/validate", post(handler::validate))
        .route("/{rid}/status", put(handler::update_status))
        .route("/{rid}/schedule", put(handler::reschedule))
        .route(
            "/{rid}/reallocation",
            post(handler::check_reallocation).put(handler::apply_reallocation),
        )
        .route("/{rid}/drop-check", post(handler::drop_check))
}
