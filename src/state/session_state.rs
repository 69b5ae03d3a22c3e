//! Session state machine

use std::time::Duration;
use serde::{Deserialize, Serialize};

use super::Timer;
use crate::utils::duration_ms;

/// State of the single countdown session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionState {
    /// No active timer
    Reset {
        #[serde(rename = "last_duration_ms", with = "duration_ms::option")]
        last_duration: Option<Duration>,
    },
    Running {
        #[serde(rename = "remaining_ms", with = "duration_ms")]
        remaining: Duration,
        timer: Timer,
    },
    Paused {
        #[serde(rename = "remaining_ms", with = "duration_ms")]
        remaining: Duration,
        timer: Timer,
    },
    /// Countdown reached zero and is held until stopped
    Done {
        #[serde(rename = "overdue_ms", with = "duration_ms")]
        overdue: Duration,
        timer: Timer,
    },
}

impl SessionState {
    /// The idle state, with nothing remembered
    pub fn reset() -> Self {
        Self::Reset { last_duration: None }
    }

    /// Whether a session currently exists
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Reset { .. })
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running { .. })
    }

    pub fn timer(&self) -> Option<&Timer> {
        match self {
            Self::Reset { .. } => None,
            Self::Running { timer, .. } | Self::Paused { timer, .. } | Self::Done { timer, .. } => {
                Some(timer)
            }
        }
    }

    /// Remaining time, only meaningful while running or paused
    pub fn remaining(&self) -> Option<Duration> {
        match self {
            Self::Running { remaining, .. } | Self::Paused { remaining, .. } => Some(*remaining),
            _ => None,
        }
    }

    /// Status tag, matching the serialized `status` field
    pub fn status(&self) -> &'static str {
        match self {
            Self::Reset { .. } => "reset",
            Self::Running { .. } => "running",
            Self::Paused { .. } => "paused",
            Self::Done { .. } => "done",
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::reset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerId;

    fn eggs() -> Timer {
        Timer::new(TimerId(0), Duration::from_secs(180), Some("🥚 Eggs — Boiled".into()))
    }

    #[test]
    fn accessors_follow_variant() {
        let running = SessionState::Running { remaining: Duration::from_secs(10), timer: eggs() };
        assert!(running.is_active());
        assert_eq!(running.remaining(), Some(Duration::from_secs(10)));
        assert_eq!(running.timer(), Some(&eggs()));

        let done = SessionState::Done { overdue: Duration::from_secs(2), timer: eggs() };
        assert!(done.is_active());
        assert_eq!(done.remaining(), None);

        assert!(!SessionState::default().is_active());
        assert_eq!(SessionState::default().timer(), None);
    }

    #[test]
    fn serialized_status_matches_status_tag() {
        let states = [
            SessionState::reset(),
            SessionState::Running { remaining: Duration::from_millis(1500), timer: eggs() },
            SessionState::Paused { remaining: Duration::from_millis(1500), timer: eggs() },
            SessionState::Done { overdue: Duration::ZERO, timer: eggs() },
        ];
        for state in states {
            let json = serde_json::to_value(&state).unwrap();
            assert_eq!(json["status"], state.status());
            let back: SessionState = serde_json::from_value(json).unwrap();
            assert_eq!(back, state);
        }
    }

    #[test]
    fn running_wire_shape() {
        let state = SessionState::Running { remaining: Duration::from_millis(1500), timer: eggs() };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["remaining_ms"], 1500);
        assert_eq!(json["timer"]["duration_ms"], 180_000);
        assert_eq!(
            serde_json::to_value(SessionState::reset()).unwrap(),
            serde_json::json!({"status": "reset", "last_duration_ms": null})
        );
    }
}
