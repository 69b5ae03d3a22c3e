//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc, time::Duration};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use chrono::Utc;
use futures::stream::{self, Stream};
use tracing::{info, warn};

use crate::state::{controller::MAX_DURATION, AppState, TimerId};
use super::responses::{
    CatalogResponse, CommandResponse, CreateTimerRequest, HealthResponse, SessionView,
    StateResponse, TickInterval, TimerEntry,
};

/// Handle GET /state - Current session with its display breakdown
pub async fn state_handler(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let controller = &state.controller;
    Json(StateResponse {
        view: SessionView::new(controller.state(), state.clock_face),
        tick_interval_ms: TickInterval::from(controller.tick_interval()).millis,
        clock_face: state.clock_face,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        timestamp: Utc::now(),
    })
}

/// Handle GET /state/stream - Server-sent session updates
///
/// The first event carries the current state, later events follow every change.
pub async fn state_stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let face = state.clock_face;
    let rx = state.controller.subscribe_state();
    info!("State stream subscriber connected");

    let events = stream::unfold((rx, true), move |(mut rx, first)| async move {
        if !first && rx.changed().await.is_err() {
            return None;
        }
        let session = rx.borrow_and_update().clone();
        let event = Event::default().event(session.status());
        let event = match event.json_data(SessionView::new(session, face)) {
            Ok(event) => event,
            Err(e) => {
                warn!("Failed to encode state event: {}", e);
                Event::default().comment("encoding failed")
            }
        };
        Some((Ok(event), (rx, false)))
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /timers - The catalog, most recently started first
pub async fn timers_handler(State(state): State<Arc<AppState>>) -> Json<CatalogResponse> {
    let controller = &state.controller;
    Json(CatalogResponse {
        timers: controller.catalog().into_iter().map(TimerEntry::from).collect(),
        active: controller.state().timer().map(|timer| timer.id),
    })
}

/// Handle POST /timers - Add a timer and start it
pub async fn create_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateTimerRequest>,
) -> Result<Json<CommandResponse>, StatusCode> {
    match state.controller.start_new(request.duration(), request.name) {
        Some(timer) => {
            info!("Create endpoint called - started new timer {}", timer);
            Ok(command_response(&state, "start"))
        }
        None => {
            warn!("Rejecting timer of {}s, too long to schedule", request.duration_secs);
            Err(StatusCode::BAD_REQUEST)
        }
    }
}

/// Handle POST /timers/:id/start - Start a catalog entry
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<CommandResponse>, StatusCode> {
    match state.controller.start_by_id(TimerId(id)) {
        Some(timer) => {
            info!("Start endpoint called - started timer {}", timer);
            Ok(command_response(&state, "start"))
        }
        None => {
            warn!("Start requested for unknown timer {}", TimerId(id));
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Handle POST /stop
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<CommandResponse> {
    state.controller.stop();
    command_response(&state, "stop")
}

/// Handle POST /reset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<CommandResponse> {
    state.controller.reset();
    command_response(&state, "reset")
}

/// Handle POST /pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Json<CommandResponse> {
    state.controller.pause();
    command_response(&state, "pause")
}

/// Handle POST /resume
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> Json<CommandResponse> {
    state.controller.resume();
    command_response(&state, "resume")
}

/// Handle POST /restart
pub async fn restart_handler(State(state): State<Arc<AppState>>) -> Json<CommandResponse> {
    state.controller.restart();
    command_response(&state, "restart")
}

/// Handle GET /tick-interval
pub async fn get_tick_interval_handler(State(state): State<Arc<AppState>>) -> Json<TickInterval> {
    Json(TickInterval::from(state.controller.tick_interval()))
}

/// Handle PUT /tick-interval
pub async fn set_tick_interval_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TickInterval>,
) -> Result<Json<TickInterval>, StatusCode> {
    let interval = Duration::from_millis(request.millis);
    if interval.is_zero() || interval > MAX_DURATION {
        warn!("Rejecting tick interval of {}ms", request.millis);
        return Err(StatusCode::BAD_REQUEST);
    }
    state.controller.set_tick_interval(interval);
    Ok(Json(TickInterval::from(state.controller.tick_interval())))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

fn command_response(state: &AppState, command: &str) -> Json<CommandResponse> {
    Json(CommandResponse::new(command, state.controller.state()))
}
