use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use festival_server::{api::app_router, build_state, config::Config};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        // Nothing listens here, so every ticket call fails fast.
        ticket_service_url: "http://127.0.0.1:9".to_string(),
        ticket_service_timeout: Duration::from_millis(200),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create_stage(app: &Router, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/stages",
        Some(json!({ "name": name, "location": "North Field", "maxCapacity": 5000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_event(app: &Router, stage_id: &str, name: &str, start: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/v1/events",
        Some(json!({
            "name": name,
            "startTime": start,
            "stageId": stage_id,
            "associatedArtist": "The Headliners",
            "capacity": 1000
        })),
    )
    .await
}

#[tokio::test]
async fn healthz_responds() {
    let (app, _tmp) = build_test_router().await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn overlapping_event_is_rejected_with_conflict() {
    let (app, _tmp) = build_test_router().await;
    let stage_id = create_stage(&app, "Main").await;

    let (status, first) = create_event(&app, &stage_id, "Opening", "2026-07-15T20:00:00").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["stageName"], "Main");

    let (status, body) = create_event(&app, &stage_id, "Clash", "2026-07-15T20:30:00").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);

    let (status, _) = create_event(&app, &stage_id, "Late Set", "2026-07-15T22:00:00").await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, schedule) = send(
        &app,
        Method::GET,
        &format!("/api/v1/stages/{stage_id}/schedule"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = schedule
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Opening", "Late Set"]);
}

#[tokio::test]
async fn reschedule_into_taken_window_is_rejected() {
    let (app, _tmp) = build_test_router().await;
    let stage_id = create_stage(&app, "Main").await;
    create_event(&app, &stage_id, "A", "2026-07-15T14:00:00").await;
    let (_, second) = create_event(&app, &stage_id, "B", "2026-07-15T18:00:00").await;
    let second_id = second["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/events/{second_id}"),
        Some(json!({ "startTime": "2026-07-15T15:00:00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, renamed) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/events/{second_id}"),
        Some(json!({ "name": "B (encore)" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "B (encore)");
    assert_eq!(renamed["startTime"], "2026-07-15T18:00:00");
}

#[tokio::test]
async fn missing_resources_are_not_found() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = send(&app, Method::GET, "/api/v1/events/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/stages/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = create_event(&app, "missing", "Ghost", "2026-07-15T20:00:00").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_event_is_bad_request() {
    let (app, _tmp) = build_test_router().await;
    let stage_id = create_stage(&app, "Main").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/events",
        Some(json!({
            "name": "Empty",
            "startTime": "2026-07-15T20:00:00",
            "stageId": stage_id,
            "associatedArtist": "Nobody",
            "capacity": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn availability_and_statistics() {
    let (app, _tmp) = build_test_router().await;
    let main = create_stage(&app, "Main").await;
    create_stage(&app, "Acoustic Barn").await;
    create_event(&app, &main, "Afternoon", "2026-07-15T16:00:00").await;

    let (status, day) = send(
        &app,
        Method::GET,
        &format!("/api/v1/stages/{main}/availability?day=2026-07-15"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(day["available"], true);
    assert_eq!(day["availableTimeSlots"].as_array().unwrap().len(), 5);

    let (status, batch) = send(
        &app,
        Method::GET,
        "/api/v1/events/availability/stage?date=2026-07-15T16:30:00",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let batch = batch.as_array().unwrap();
    assert_eq!(batch[0]["stageName"], "Acoustic Barn");
    assert_eq!(batch[0]["available"], true);
    assert_eq!(batch[1]["stageName"], "Main");
    assert_eq!(batch[1]["available"], false);

    let (status, stats) = send(&app, Method::GET, "/api/v1/events/statistics", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalEvents"], 1);
    assert_eq!(stats["totalCapacity"], 1000);
    assert_eq!(stats["eventsPerDay"]["2026-07-15"], 1);
}

#[tokio::test]
async fn deleting_a_stage_removes_its_events() {
    let (app, _tmp) = build_test_router().await;
    let stage_id = create_stage(&app, "Main").await;
    create_event(&app, &stage_id, "Opening", "2026-07-15T20:00:00").await;

    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/stages/{stage_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, events) = send(&app, Method::GET, "/api/v1/events", None).await;
    assert!(events.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn ticket_info_degrades_when_ticket_service_is_down() {
    let (app, _tmp) = build_test_router().await;
    let stage_id = create_stage(&app, "Main").await;
    let (_, event) = create_event(&app, &stage_id, "Opening", "2026-07-15T20:00:00").await;
    let event_id = event["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/events/{event_id}/tickets"))
                .header("X-Region", "US")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let info: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(info["ticketStatus"], "UNKNOWN");
    assert_eq!(info["name"], "Opening");
    assert!(info["message"].as_str().unwrap().contains("US pricing"));

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/events/{event_id}/reserve"),
        Some(json!({ "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], 502);
}

#[tokio::test]
async fn out_of_range_start_is_bad_request() {
    let (app, _tmp) = build_test_router().await;
    let stage_id = create_stage(&app, "Main").await;

    let (status, body) = create_event(&app, &stage_id, "Far Future", "+262142-12-31T23:30:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/events/availability/stage?date=%2B262142-12-31T23:30:00",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_requests_get_error_bodies() {
    let (app, _tmp) = build_test_router().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/stages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 400);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/stages/filter/capacity?minCapacity=lots",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}
