//! HTTP 接口端到端测试
//!
//! 通过 `build_app` + `oneshot` 在进程内调用路由，不绑定端口

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use reservation_server::{Config, ServerState, api};
use serde_json::{Value, json};
use tower::ServiceExt;

const DATE: &str = "2099-06-13";

fn app() -> Router {
    let config = Config::with_overrides("/tmp/reservation-api-test", 0);
    let state = ServerState::initialize(&config);
    api::build_app(&state).with_state(state)
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

struct Fixture {
    restaurant_id: i64,
    shift_id: i64,
    a2: i64,
    b4: i64,
    c6: i64,
}

async fn setup(app: &Router) -> Fixture {
    let (status, restaurant) = call(
        app,
        Method::POST,
        "/api/restaurants",
        Some(json!({
            "name": "Tasca",
            "timezone": "Europe/Lisbon",
            "booking_cutoff_hours": 2,
            "max_party_size": 12,
            "max_online_party_size": 6
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{restaurant}");
    let restaurant_id = restaurant["id"].as_i64().unwrap();

    let (status, shift) = call(
        app,
        Method::POST,
        &format!("/api/restaurants/{restaurant_id}/shifts"),
        Some(json!({
            "name": "Dinner",
            "start_time": "18:00",
            "end_time": "22:00",
            "slot_interval_minutes": 30,
            "default_dwell_minutes": 90,
            "default_buffer_minutes": 15,
            "days_of_week": [0, 1, 2, 3, 4, 5, 6]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{shift}");
    let shift_id = shift["id"].as_i64().unwrap();

    let mut ids = Vec::new();
    for (name, seats) in [("A2", 2), ("B4", 4), ("C6", 6)] {
        let (status, table) = call(
            app,
            Method::POST,
            &format!("/api/restaurants/{restaurant_id}/tables"),
            Some(json!({ "name": name, "seats": seats })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{table}");
        ids.push(table["id"].as_i64().unwrap());
    }

    Fixture {
        restaurant_id,
        shift_id,
        a2: ids[0],
        b4: ids[1],
        c6: ids[2],
    }
}

fn booking(f: &Fixture, slot: &str, party: i32, channel: &str) -> Value {
    json!({
        "date": DATE,
        "shift_id": f.shift_id,
        "slot_time": slot,
        "party_size": party,
        "guest_name": "Guest",
        "channel": channel
    })
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["restaurants"], 0);
}

#[tokio::test]
async fn test_availability_lists_every_slot_with_its_tables() {
    let app = app();
    let f = setup(&app).await;

    let uri = format!(
        "/api/restaurants/{}/availability?date={DATE}&shift_id={}&party_size=4",
        f.restaurant_id, f.shift_id
    );
    let (status, body) = call(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let slots = body.as_array().unwrap();
    let times: Vec<&str> = slots.iter().map(|s| s["time"].as_str().unwrap()).collect();
    assert_eq!(
        times,
        vec!["18:00", "18:30", "19:00", "19:30", "20:00", "20:30", "21:00", "21:30"]
    );
    // Greedy prefix: A2 alone is short, A2 + B4 covers four
    assert_eq!(slots[0]["table_count"], 2);
    let names: Vec<&str> = slots[0]["tables"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["A2", "B4"]);
    assert_eq!(slots[0]["total_seats"], 6);
}

#[tokio::test]
async fn test_online_party_cap_applies_to_public_channel_only() {
    let app = app();
    let f = setup(&app).await;

    let base = format!(
        "/api/restaurants/{}/availability?date={DATE}&shift_id={}&party_size=8",
        f.restaurant_id, f.shift_id
    );
    let (status, body) = call(&app, Method::GET, &format!("{base}&channel=public"), None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    assert_eq!(body["code"], 4006);

    let (status, body) = call(&app, Method::GET, &format!("{base}&channel=staff"), None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(!body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_flow_with_conflicts_and_status_changes() {
    let app = app();
    let f = setup(&app).await;
    let reservations = format!("/api/restaurants/{}/reservations", f.restaurant_id);

    // Staff booking lands on A2 + B4 and is confirmed straight away
    let (status, first) = call(&app, Method::POST, &reservations, Some(booking(&f, "19:00", 4, "staff"))).await;
    assert_eq!(status, StatusCode::OK, "{first}");
    assert_eq!(first["status"], "confirmed");
    assert_eq!(first["linked_tables"], json!([f.a2, f.b4]));
    let first_id = first["id"].as_i64().unwrap();

    // Public booking at 19:30 only has C6 left and starts pending
    let (status, second) = call(&app, Method::POST, &reservations, Some(booking(&f, "19:30", 5, "public"))).await;
    assert_eq!(status, StatusCode::OK, "{second}");
    assert_eq!(second["status"], "pending");
    assert_eq!(second["linked_tables"], json!([f.c6]));
    let second_id = second["id"].as_i64().unwrap();

    // Nothing is free at 19:00 any more
    let (status, body) = call(
        &app,
        Method::POST,
        &format!("{reservations}/validate"),
        Some(booking(&f, "19:00", 2, "staff")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], false);
    assert_eq!(body["rejection"]["kind"], "capacity_infeasible");

    let (status, body) = call(&app, Method::POST, &reservations, Some(booking(&f, "19:00", 2, "staff"))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4010);

    // Cancelling (case-insensitive) frees A2 + B4
    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("{reservations}/{first_id}/status"),
        Some(json!({ "status": "CANCELLED" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "cancelled");

    let (status, third) = call(&app, Method::POST, &reservations, Some(booking(&f, "19:00", 2, "staff"))).await;
    assert_eq!(status, StatusCode::OK, "{third}");
    assert_eq!(third["linked_tables"], json!([f.a2]));

    // Dropping the 19:30 party onto A2 collides with the 19:00 booking
    let (status, check) = call(
        &app,
        Method::POST,
        &format!("{reservations}/{second_id}/drop-check"),
        Some(json!({ "table_id": f.a2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(check["can_drop"], false);
    assert_eq!(check["rejection"]["kind"], "conflict");

    let (status, list) = call(&app, Method::GET, &format!("{reservations}?date={DATE}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_reallocation_preview_then_commit() {
    let app = app();
    let f = setup(&app).await;
    let reservations = format!("/api/restaurants/{}/reservations", f.restaurant_id);

    let (_, created) = call(&app, Method::POST, &reservations, Some(booking(&f, "20:00", 6, "staff"))).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["linked_tables"], json!([f.a2, f.b4]));

    // Party shrinks to two: the preview re-packs onto A2 without writing
    let uri = format!("{reservations}/{id}/reallocation");
    let (status, preview) = call(&app, Method::POST, &uri, Some(json!({ "party_size": 2 }))).await;
    assert_eq!(status, StatusCode::OK, "{preview}");
    assert_eq!(preview["success"], true);
    assert_eq!(preview["changed"], true);
    assert_eq!(preview["freed_tables"], json!(["B4"]));

    let (_, list) = call(&app, Method::GET, &format!("{reservations}?date={DATE}"), None).await;
    assert_eq!(list[0]["party_size"], 6);

    let (status, applied) = call(&app, Method::PUT, &uri, Some(json!({ "party_size": 2 }))).await;
    assert_eq!(status, StatusCode::OK, "{applied}");
    assert_eq!(applied["reservation"]["party_size"], 2);
    assert_eq!(applied["reservation"]["linked_tables"], json!([f.a2]));

    // Growing beyond the restaurant maximum is refused and nothing changes
    let (status, body) = call(&app, Method::PUT, &uri, Some(json!({ "party_size": 13 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4005);
}

#[tokio::test]
async fn test_reschedule_moves_the_booking() {
    let app = app();
    let f = setup(&app).await;
    let reservations = format!("/api/restaurants/{}/reservations", f.restaurant_id);

    let (_, created) = call(&app, Method::POST, &reservations, Some(booking(&f, "18:00", 2, "staff"))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, moved) = call(
        &app,
        Method::PUT,
        &format!("{reservations}/{id}/schedule"),
        Some(json!({ "date": DATE, "shift_id": f.shift_id, "slot_time": "18:30" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{moved}");
    assert_eq!(moved["slot_time"], "18:30");
    assert_eq!(moved["linked_tables"], json!([f.a2]));

    // Off-grid slot
    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("{reservations}/{id}/schedule"),
        Some(json!({ "date": DATE, "shift_id": f.shift_id, "slot_time": "18:45" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4003);
}

#[tokio::test]
async fn test_configuration_errors() {
    let app = app();
    let f = setup(&app).await;

    let (status, body) = call(&app, Method::GET, "/api/restaurants/42/tables", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/restaurants/{}/tables", f.restaurant_id),
        Some(json!({ "name": "A2", "seats": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = call(
        &app,
        Method::POST,
        &format!("/api/restaurants/{}/shifts", f.restaurant_id),
        Some(json!({
            "name": "Broken",
            "start_time": "22:00",
            "end_time": "18:00",
            "slot_interval_minutes": 30,
            "default_dwell_minutes": 90
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Dinner's 21:30 slot holds tables until 23:15
    let (status, body) = call(
        &app,
        Method::POST,
        &format!("/api/restaurants/{}/shifts", f.restaurant_id),
        Some(json!({
            "name": "Late",
            "start_time": "22:30",
            "end_time": "23:59",
            "slot_interval_minutes": 30,
            "default_dwell_minutes": 60,
            "days_of_week": [6]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Dinner"), "{body}");

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/restaurants",
        Some(json!({ "name": "Elsewhere", "timezone": "Mars/Olympus" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
