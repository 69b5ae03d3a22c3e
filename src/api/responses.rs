//! API request and response structures

use std::time::Duration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    display::{Breakdown, ClockFace, RingProgress},
    state::{SessionState, Timer, TimerId},
    utils::duration_ms,
};

/// What a presentation layer needs to draw the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session: SessionState,
    /// `HH : MM : SS`, present while running or paused
    pub label: Option<String>,
    pub breakdown: Option<Breakdown>,
    pub progress: Option<RingProgress>,
}

impl SessionView {
    pub fn new(session: SessionState, face: ClockFace) -> Self {
        let breakdown = session.remaining().map(|remaining| Breakdown::of(remaining, face));
        Self {
            label: breakdown.map(|b| b.to_string()),
            progress: breakdown.map(|b| b.progress(face)),
            breakdown,
            session,
        }
    }
}

/// Response for GET /state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateResponse {
    #[serde(flatten)]
    pub view: SessionView,
    pub tick_interval_ms: u64,
    pub clock_face: ClockFace,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub timestamp: DateTime<Utc>,
}

/// Response for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub command: String,
    pub session: SessionState,
    pub timestamp: DateTime<Utc>,
}

impl CommandResponse {
    pub fn new(command: &str, session: SessionState) -> Self {
        Self {
            command: command.to_string(),
            session,
            timestamp: Utc::now(),
        }
    }
}

/// One catalog entry with its list label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEntry {
    #[serde(flatten)]
    pub timer: Timer,
    pub label: String,
}

impl From<Timer> for TimerEntry {
    fn from(timer: Timer) -> Self {
        Self { label: timer.label(), timer }
    }
}

/// Response for GET /timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub timers: Vec<TimerEntry>,
    /// Timer of the current session, if any
    pub active: Option<TimerId>,
}

/// Body for POST /timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimerRequest {
    pub duration_secs: u64,
    #[serde(default)]
    pub name: Option<String>,
}

impl CreateTimerRequest {
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

/// Body and response for /tick-interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TickInterval {
    pub millis: u64,
}

impl From<Duration> for TickInterval {
    fn from(interval: Duration) -> Self {
        Self { millis: duration_ms::as_millis(interval) }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
