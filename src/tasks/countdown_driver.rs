//! Countdown driver background task

use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::state::SessionController;

/// Schedule for one countdown driver
#[derive(Debug, Clone, Copy)]
pub struct DriverPlan {
    /// Session generation the ticks belong to
    pub generation: u64,
    pub first_tick: Instant,
    pub tick_interval: Duration,
    /// Instant at which the remaining time reaches zero
    pub deadline: Instant,
}

/// What the controller did with a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Keep ticking
    Continue,
    /// The countdown reached zero and the session was reset
    Finished,
    /// The driver no longer owns the session
    Stale,
}

/// Background task that ticks the session until it finishes or is cancelled
///
/// Remaining time is measured against the deadline on every tick, so a late
/// wake-up never accumulates drift. The deadline itself always gets a tick,
/// even when it falls between two intervals.
pub async fn countdown_driver_task(controller: SessionController, plan: DriverPlan) {
    debug!(
        "Countdown driver {} started, interval {:?}",
        plan.generation, plan.tick_interval
    );

    let mut next_tick = plan.first_tick;
    let mut deadline_seen = false;

    loop {
        let wake = if deadline_seen { next_tick } else { next_tick.min(plan.deadline) };
        sleep_until(wake).await;
        if wake >= plan.deadline {
            deadline_seen = true;
        }

        let now = Instant::now();
        match controller.apply_tick(plan.generation, now) {
            TickOutcome::Continue => {}
            outcome => {
                debug!("Countdown driver {} exiting: {:?}", plan.generation, outcome);
                break;
            }
        }

        while next_tick <= now {
            match next_tick.checked_add(plan.tick_interval) {
                Some(tick) => next_tick = tick,
                None => {
                    debug!("Countdown driver {} ran out of clock range", plan.generation);
                    return;
                }
            }
        }
    }
}
