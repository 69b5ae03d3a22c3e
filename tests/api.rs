use std::{sync::Arc, time::Duration};
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::{runtime::Handle, time::sleep};
use tower::ServiceExt;

use countdown_timer::{
    create_router, display::ClockFace, AppState, Catalog, SessionController, SessionSettings,
};

fn app() -> (Router, SessionController) {
    let settings = SessionSettings {
        start_delay: Duration::ZERO,
        ..SessionSettings::default()
    };
    let controller = SessionController::new(Catalog::seeded(), settings, Handle::current());
    let state = Arc::new(AppState::new(
        controller.clone(),
        ClockFace::TwentyFourHour,
        20554,
        "127.0.0.1".to_string(),
    ));
    (create_router(state), controller)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(body.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test(start_paused = true)]
async fn health_reports_ok() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn idle_state_has_no_breakdown() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/state", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["status"], "reset");
    assert_eq!(body["label"], Value::Null);
    assert_eq!(body["tick_interval_ms"], 1000);
    assert_eq!(body["port"], 20554);
    assert_eq!(body["host"], "127.0.0.1");
}

#[tokio::test(start_paused = true)]
async fn create_timer_starts_it() {
    let (app, controller) = app();
    let before = controller.catalog().len();

    let (status, body) = send(
        &app,
        Method::POST,
        "/timers",
        Some(json!({"duration_secs": 3723, "name": "Bread"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["command"], "start");
    assert_eq!(body["session"]["status"], "running");
    assert_eq!(body["session"]["timer"]["name"], "Bread");
    assert_eq!(controller.catalog().len(), before + 1);

    let (_, state) = send(&app, Method::GET, "/state", None).await;
    assert_eq!(state["label"], "01 : 02 : 03");
    assert_eq!(state["breakdown"], json!({"hours": 1, "minutes": 2, "seconds": 3}));

    let (_, catalog) = send(&app, Method::GET, "/timers", None).await;
    assert_eq!(catalog["timers"][0]["label"], "Bread (1h 2m 3s)");
    assert_eq!(catalog["active"], catalog["timers"][0]["id"]);
}

#[tokio::test(start_paused = true)]
async fn start_unknown_timer_is_not_found() {
    let (app, controller) = app();
    let (status, _) = send(&app, Method::POST, "/timers/999/start", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(!controller.state().is_active());
}

#[tokio::test(start_paused = true)]
async fn start_existing_timer_moves_it_first() {
    let (app, controller) = app();
    let last = controller.catalog().last().cloned().unwrap();

    let uri = format!("/timers/{}/start", last.id.0);
    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["timer"]["id"], last.id.0);
    assert_eq!(controller.catalog()[0], last);
}

#[tokio::test(start_paused = true)]
async fn pause_and_resume_commands() {
    let (app, _) = app();
    send(&app, Method::POST, "/timers", Some(json!({"duration_secs": 60}))).await;
    sleep(Duration::from_millis(2500)).await;

    let (_, paused) = send(&app, Method::POST, "/pause", None).await;
    assert_eq!(paused["session"]["status"], "paused");
    assert_eq!(paused["session"]["remaining_ms"], 57_500);

    let (_, resumed) = send(&app, Method::POST, "/resume", None).await;
    assert_eq!(resumed["session"]["status"], "running");

    let (_, stopped) = send(&app, Method::POST, "/stop", None).await;
    assert_eq!(stopped["session"]["status"], "reset");

    let (_, ignored) = send(&app, Method::POST, "/resume", None).await;
    assert_eq!(ignored["session"]["status"], "reset");
}

#[tokio::test(start_paused = true)]
async fn tick_interval_round_trip() {
    let (app, controller) = app();

    let (status, body) =
        send(&app, Method::PUT, "/tick-interval", Some(json!({"millis": 16}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["millis"], 16);
    assert_eq!(controller.tick_interval(), Duration::from_millis(16));

    let (status, _) = send(&app, Method::PUT, "/tick-interval", Some(json!({"millis": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, Method::GET, "/tick-interval", None).await;
    assert_eq!(body["millis"], 16);
}

#[tokio::test(start_paused = true)]
async fn oversized_timer_is_rejected() {
    let (app, controller) = app();
    let catalog = controller.catalog();

    let (status, _) = send(
        &app,
        Method::POST,
        "/timers",
        Some(json!({"duration_secs": u64::MAX, "name": "Forever"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(controller.catalog(), catalog);
    assert!(!controller.state().is_active());

    // The server keeps serving afterwards
    let (status, body) = send(&app, Method::GET, "/state", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["status"], "reset");
}

#[tokio::test(start_paused = true)]
async fn oversized_tick_interval_is_rejected() {
    let (app, controller) = app();
    let (status, _) = send(
        &app,
        Method::PUT,
        "/tick-interval",
        Some(json!({"millis": u64::MAX})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(controller.tick_interval(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn state_stream_replays_current_state_then_follows_changes() {
    let (app, _) = app();
    send(&app, Method::POST, "/timers", Some(json!({"duration_secs": 60, "name": "Tea"}))).await;

    let request = Request::builder().uri("/state/stream").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
    let mut frames = response.into_body().into_data_stream();

    let first = frames.next().await.unwrap().unwrap();
    let first = String::from_utf8(first.to_vec()).unwrap();
    assert!(first.contains("event: running"), "first frame: {}", first);
    assert!(first.contains("\"remaining_ms\":60000"), "first frame: {}", first);
    assert!(first.contains("\"name\":\"Tea\""), "first frame: {}", first);

    send(&app, Method::POST, "/pause", None).await;

    let mut paused = None;
    for _ in 0..5 {
        let frame = frames.next().await.unwrap().unwrap();
        let frame = String::from_utf8(frame.to_vec()).unwrap();
        if frame.contains("event: paused") {
            paused = Some(frame);
            break;
        }
    }
    let paused = paused.expect("no paused event on the stream");
    assert!(paused.contains("\"status\":\"paused\""), "paused frame: {}", paused);
    assert!(paused.contains("\"name\":\"Tea\""), "paused frame: {}", paused);
}
