//! Ordered list of selectable timers

use std::time::Duration;
use tracing::debug;

use super::timer::{Timer, TimerId};

/// Seed entries as (seconds, name)
const SEED: &[(u64, Option<&str>)] = &[
    (3 * 60, Some("🥚 Eggs — Boiled")),
    (3, Some("Hurry up!!!")),
    (3 * 3600 + 35 * 60 + 12, Some("⏳ Take your time")),
    (40, Some("🏋️‍♂️Workout — Squats")),
    (37, None),
    (45, Some("🏋️‍♂️Workout — Plank")),
    (25 * 60, Some("🍅 Pomodoro")),
    (5 * 60, Some("⏸ Break")),
    (15 * 60, Some("😴 Long break")),
];

/// Timer catalog, most recently started first
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    timers: Vec<Timer>,
    next_id: u64,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the built-in timers
    pub fn seeded() -> Self {
        let mut catalog = Self::new();
        for &(secs, name) in SEED {
            let timer = catalog.create(Duration::from_secs(secs), name.map(str::to_string));
            catalog.timers.push(timer);
        }
        catalog
    }

    /// Allocate a timer with a fresh id
    ///
    /// The timer is not listed until it is started.
    pub fn create(&mut self, duration: Duration, name: Option<String>) -> Timer {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        Timer::new(id, duration, name)
    }

    /// Move `timer` to the front, inserting it if its id is not listed yet
    pub fn promote(&mut self, timer: Timer) {
        if let Some(index) = self.position(timer.id) {
            self.timers.remove(index);
            debug!("Moving timer {} from index {} to front", timer.id, index);
        } else {
            debug!("Adding timer {} to catalog", timer.id);
        }
        // Ids built outside `create` must not be handed out again
        self.next_id = self.next_id.max(timer.id.0 + 1);
        self.timers.insert(0, timer);
    }

    pub fn get(&self, id: TimerId) -> Option<&Timer> {
        self.timers.iter().find(|timer| timer.id == id)
    }

    pub fn position(&self, id: TimerId) -> Option<usize> {
        self.timers.iter().position(|timer| timer.id == id)
    }

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}
