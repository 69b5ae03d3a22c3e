//! Duration decomposition and ring progress

use std::{fmt, time::Duration};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of hours shown before the hour digits wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ClockFace {
    #[value(name = "12")]
    TwelveHour,
    #[default]
    #[value(name = "24")]
    TwentyFourHour,
}

impl ClockFace {
    pub fn hours(self) -> u64 {
        match self {
            Self::TwelveHour => 12,
            Self::TwentyFourHour => 24,
        }
    }
}

/// Whole hours, minutes and seconds of a remaining time span
///
/// Sub-second remainders are floored away. Digits and ring progress both
/// come from this one integer decomposition so they can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Breakdown {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Breakdown {
    pub fn of(remaining: Duration, face: ClockFace) -> Self {
        let total_seconds = remaining.as_secs();
        Self {
            hours: (total_seconds / 3600) % face.hours(),
            minutes: (total_seconds / 60) % 60,
            seconds: total_seconds % 60,
        }
    }

    pub fn progress(&self, face: ClockFace) -> RingProgress {
        RingProgress {
            hours: ratio(self.hours, face.hours()),
            minutes: ratio(self.minutes, 60),
            seconds: ratio(self.seconds, 60),
        }
    }
}

/// `HH : MM : SS`
impl fmt::Display for Breakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} : {:02} : {:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Fill ratio of the three concentric rings, each in `[0, 1)`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RingProgress {
    pub hours: f32,
    pub minutes: f32,
    pub seconds: f32,
}

impl RingProgress {
    /// Whether any ring has something to draw
    pub fn is_empty(&self) -> bool {
        self.hours == 0.0 && self.minutes == 0.0 && self.seconds == 0.0
    }
}

// Exactly zero for a zero component, never a residual fraction
fn ratio(value: u64, full: u64) -> f32 {
    if value == 0 {
        0.0
    } else {
        value as f32 / full as f32
    }
}
