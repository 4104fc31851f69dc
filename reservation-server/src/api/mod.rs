//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`restaurants`] - 餐厅及预订规则
//! - [`zones`] - 区域管理接口
//! - [`shifts`] - 服务时段管理接口
//! - [`tables`] - 桌台管理接口
//! - [`availability`] - 可订时段查询
//! - [`reservations`] - 预订、重新分配、拖放检查

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

pub mod availability;
pub mod health;
pub mod reservations;
pub mod restaurants;
pub mod shifts;
pub mod tables;
pub mod zones;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Configuration API
        .merge(restaurants::router())
        .merge(zones::router())
        .merge(shifts::router())
        .merge(tables::router())
        // Booking API
        .merge(availability::router())
        .merge(reservations::router())
}

/// Build a fully configured application with all middleware
///
/// Used by both the HTTP server and in-process tests
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    // Production only serves same-origin clients
    let cors = if state.config.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::permissive()
    };

    build_router()
        // CORS - Handle cross-origin requests
        .layer(cors)
        // Timeout - abort slow requests
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_millis(state.config.request_timeout_ms),
        ))
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
}
