//! Timer templates and their identifiers

use std::{fmt, time::Duration};
use serde::{Deserialize, Serialize};

use crate::{display::humanize, utils::duration_ms};

/// Label shown for timers created without a name
pub const UNNAMED_TIMER: &str = "Unnamed timer";

/// Stable identifier assigned when a timer enters the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named countdown template
///
/// Two timers with the same duration and name are still distinct entries
/// when their ids differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub duration: Duration,
    pub name: Option<String>,
}

impl Timer {
    pub fn new(id: TimerId, duration: Duration, name: Option<String>) -> Self {
        Self { id, duration, name }
    }

    /// Name to display, falling back to a placeholder for unnamed timers
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNNAMED_TIMER)
    }

    /// List entry text, e.g. `🍅 Pomodoro (25m)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.display_name(), humanize(self.duration))
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.label())
    }
}
