//! Timer session controller
//!
//! Owns the catalog and the single countdown session. Every mutation goes
//! through the session lock, and every change is published on a watch
//! channel so late subscribers see the latest value immediately.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};
use tokio::{
    runtime::Handle,
    sync::watch,
    task::JoinHandle,
    time::Instant,
};
use tracing::{debug, info, warn};

use super::{Catalog, SessionState, Timer, TimerId};
use crate::tasks::{countdown_driver_task, DriverPlan, TickOutcome};

/// Default interval between ticks
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Tick interval for frame-rate animation
pub const SMOOTH_TICK_INTERVAL: Duration = Duration::from_millis(16);
/// Settle delay before a freshly started countdown begins
pub const DEFAULT_START_DELAY: Duration = Duration::from_millis(300);
/// Longest timer, tick interval or start delay the controller schedules
pub const MAX_DURATION: Duration = Duration::from_secs(100 * 365 * 24 * 3600);

/// Behaviour knobs for the countdown
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub tick_interval: Duration,
    /// Applied on `start`, not on `resume`
    pub start_delay: Duration,
    /// Enter `Done` at zero instead of returning to `Reset`
    pub hold_on_finish: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            start_delay: DEFAULT_START_DELAY,
            hold_on_finish: false,
        }
    }
}

/// The running countdown driver of the current session
#[derive(Debug)]
struct Driver {
    generation: u64,
    /// When the countdown actually begins (after the start delay)
    started_at: Instant,
    deadline: Instant,
    /// Remaining time when the driver was scheduled
    budget: Duration,
    task: JoinHandle<()>,
}

impl Driver {
    fn remaining_at(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now).min(self.budget)
    }

    fn cancel(self) {
        debug!("Cancelling countdown driver generation {}", self.generation);
        self.task.abort();
    }
}

#[derive(Debug)]
struct Session {
    state: SessionState,
    catalog: Catalog,
    driver: Option<Driver>,
    /// Bumped whenever a driver is scheduled or cancelled
    generation: u64,
}

#[derive(Debug)]
struct Shared {
    session: Mutex<Session>,
    state_tx: watch::Sender<SessionState>,
    catalog_tx: watch::Sender<Vec<Timer>>,
    tick_interval_tx: watch::Sender<Duration>,
    start_delay: Duration,
    hold_on_finish: bool,
}

/// Handle to the timer session controller
///
/// Cheap to clone; all clones drive the same session. Drivers are spawned
/// on the runtime handle given at construction.
#[derive(Debug, Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
    runtime: Handle,
}

impl SessionController {
    /// Create a controller over `catalog`, scheduling drivers on `runtime`
    pub fn new(catalog: Catalog, settings: SessionSettings, runtime: Handle) -> Self {
        let (state_tx, _) = watch::channel(SessionState::reset());
        let (catalog_tx, _) = watch::channel(catalog.timers().to_vec());
        let tick_interval = if settings.tick_interval.is_zero() || settings.tick_interval > MAX_DURATION {
            warn!("Tick interval {:?} out of range, using {:?}", settings.tick_interval, DEFAULT_TICK_INTERVAL);
            DEFAULT_TICK_INTERVAL
        } else {
            settings.tick_interval
        };
        let (tick_interval_tx, _) = watch::channel(tick_interval);

        Self {
            shared: Arc::new(Shared {
                session: Mutex::new(Session {
                    state: SessionState::reset(),
                    catalog,
                    driver: None,
                    generation: 0,
                }),
                state_tx,
                catalog_tx,
                tick_interval_tx,
                start_delay: if settings.start_delay > MAX_DURATION {
                    warn!("Start delay {:?} too long, using {:?}", settings.start_delay, MAX_DURATION);
                    MAX_DURATION
                } else {
                    settings.start_delay
                },
                hold_on_finish: settings.hold_on_finish,
            }),
            runtime,
        }
    }

    /// Start `timer`, replacing any current session
    pub fn start(&self, timer: Timer) {
        let mut session = self.lock_session();
        self.start_locked(&mut session, timer);
    }

    /// Whether a timer of `duration` can be started
    pub fn is_schedulable(duration: Duration) -> bool {
        duration <= MAX_DURATION
    }

    /// Start the catalog entry with `id`, returning it if it exists
    pub fn start_by_id(&self, id: TimerId) -> Option<Timer> {
        let mut session = self.lock_session();
        let Some(timer) = session.catalog.get(id).cloned() else {
            debug!("No timer {} in catalog", id);
            return None;
        };
        self.start_locked(&mut session, timer.clone()).then_some(timer)
    }

    /// Add a new timer to the catalog and start it
    ///
    /// Returns `None`, leaving the catalog untouched, when `duration` is
    /// too long to schedule.
    pub fn start_new(&self, duration: Duration, name: Option<String>) -> Option<Timer> {
        if !Self::is_schedulable(duration) {
            warn!("Refusing to create timer of {:?}", duration);
            return None;
        }
        let mut session = self.lock_session();
        let timer = session.catalog.create(duration, name);
        self.start_locked(&mut session, timer.clone()).then_some(timer)
    }

    /// Start the current session's timer again from its full duration
    pub fn restart(&self) {
        let mut session = self.lock_session();
        let current = session.state.timer().cloned();
        match current {
            Some(timer) => {
                self.start_locked(&mut session, timer);
            }
            None => debug!("Ignoring restart, no session"),
        }
    }

    /// Cancel the session and return to `Reset`
    pub fn stop(&self) {
        let mut session = self.lock_session();
        if session.state.is_active() {
            info!("Stopping timer session");
        }
        Self::cancel_driver(&mut session);
        self.publish_state(&mut session, SessionState::reset());
    }

    /// Same as [`stop`](Self::stop)
    pub fn reset(&self) {
        self.stop();
    }

    /// Freeze a running session; ignored in any other state
    pub fn pause(&self) {
        let mut session = self.lock_session();
        let SessionState::Running { timer, .. } = &session.state else {
            debug!("Ignoring pause while {}", session.state.status());
            return;
        };
        let timer = timer.clone();
        let now = Instant::now();
        let remaining = match &session.driver {
            Some(driver) => driver.remaining_at(now),
            None => session.state.remaining().unwrap_or_default(),
        };

        Self::cancel_driver(&mut session);
        info!("Pausing timer {} with {:?} remaining", timer.id, remaining);
        self.publish_state(&mut session, SessionState::Paused { remaining, timer });
    }

    /// Continue a paused session; ignored in any other state
    pub fn resume(&self) {
        let mut session = self.lock_session();
        let SessionState::Paused { remaining, timer } = &session.state else {
            debug!("Ignoring resume while {}", session.state.status());
            return;
        };
        let (remaining, timer) = (*remaining, timer.clone());

        info!("Resuming timer {} with {:?} remaining", timer.id, remaining);
        let now = Instant::now();
        let Some(deadline) = now.checked_add(remaining) else {
            warn!("Cannot resume timer {}, deadline out of range", timer.id);
            return;
        };
        self.schedule_driver(&mut session, now, deadline, remaining);
        self.publish_state(&mut session, SessionState::Running { remaining, timer });
    }

    /// Change the tick interval; zero or overlong intervals are ignored
    ///
    /// A live driver is rescheduled against the same deadline.
    pub fn set_tick_interval(&self, interval: Duration) {
        if interval.is_zero() || interval > MAX_DURATION {
            debug!("Ignoring tick interval {:?}", interval);
            return;
        }
        let mut session = self.lock_session();
        self.shared.tick_interval_tx.send_replace(interval);
        info!("Tick interval set to {:?}", interval);

        if let Some(driver) = session.driver.take() {
            let (started_at, deadline, budget) = (driver.started_at, driver.deadline, driver.budget);
            driver.cancel();
            let started_at = started_at.max(Instant::now());
            self.schedule_driver(&mut session, started_at, deadline, budget);
        }
    }

    /// Cancel any driver, e.g. on process exit
    pub fn shutdown(&self) {
        let mut session = self.lock_session();
        Self::cancel_driver(&mut session);
    }

    pub fn state(&self) -> SessionState {
        self.shared.state_tx.borrow().clone()
    }

    pub fn catalog(&self) -> Vec<Timer> {
        self.shared.catalog_tx.borrow().clone()
    }

    pub fn tick_interval(&self) -> Duration {
        *self.shared.tick_interval_tx.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.shared.state_tx.subscribe()
    }

    pub fn subscribe_catalog(&self) -> watch::Receiver<Vec<Timer>> {
        self.shared.catalog_tx.subscribe()
    }

    pub fn subscribe_tick_interval(&self) -> watch::Receiver<Duration> {
        self.shared.tick_interval_tx.subscribe()
    }

    /// Apply a driver tick observed at `now`
    ///
    /// Ticks from a cancelled or replaced driver are dropped.
    pub(crate) fn apply_tick(&self, generation: u64, now: Instant) -> TickOutcome {
        let mut session = self.lock_session();
        let deadline = match &session.driver {
            Some(driver) if driver.generation == generation => driver.deadline,
            _ => {
                debug!("Dropping stale tick from driver generation {}", generation);
                return TickOutcome::Stale;
            }
        };

        let next = match session.state.clone() {
            SessionState::Running { timer, .. } => {
                let remaining = deadline.saturating_duration_since(now);
                if !remaining.is_zero() {
                    SessionState::Running { remaining, timer }
                } else if self.shared.hold_on_finish {
                    info!("Timer {} finished, holding", timer.id);
                    SessionState::Done { overdue: now.saturating_duration_since(deadline), timer }
                } else {
                    info!("Timer {} finished", timer.id);
                    // The finishing driver is the caller, so detach instead of aborting
                    session.driver = None;
                    session.generation += 1;
                    self.publish_state(&mut session, SessionState::reset());
                    return TickOutcome::Finished;
                }
            }
            SessionState::Done { timer, .. } => {
                SessionState::Done { overdue: now.saturating_duration_since(deadline), timer }
            }
            state => {
                warn!("Driver generation {} still ticking while {}", generation, state.status());
                return TickOutcome::Stale;
            }
        };

        self.publish_state(&mut session, next);
        TickOutcome::Continue
    }

    /// Start `timer` unless its deadline is out of range; nothing changes then
    fn start_locked(&self, session: &mut Session, timer: Timer) -> bool {
        let window = Instant::now()
            .checked_add(self.shared.start_delay)
            .and_then(|started_at| Some((started_at, started_at.checked_add(timer.duration)?)))
            .filter(|_| Self::is_schedulable(timer.duration));
        let Some((started_at, deadline)) = window else {
            warn!("Refusing to start timer {}, duration {:?} out of range", timer.id, timer.duration);
            return false;
        };

        info!("Starting timer {}", timer);
        session.catalog.promote(timer.clone());
        self.shared.catalog_tx.send_replace(session.catalog.timers().to_vec());

        self.schedule_driver(session, started_at, deadline, timer.duration);
        self.publish_state(
            session,
            SessionState::Running { remaining: timer.duration, timer },
        );
        true
    }

    /// Replace the current driver with one counting down to `deadline`
    fn schedule_driver(
        &self,
        session: &mut Session,
        started_at: Instant,
        deadline: Instant,
        budget: Duration,
    ) {
        Self::cancel_driver(session);

        let tick_interval = *self.shared.tick_interval_tx.borrow();
        let plan = DriverPlan {
            generation: session.generation,
            first_tick: started_at.checked_add(tick_interval).unwrap_or(deadline),
            tick_interval,
            deadline,
        };
        debug!("Scheduling countdown driver generation {}", plan.generation);
        let task = self.runtime.spawn(countdown_driver_task(self.clone(), plan));

        session.driver = Some(Driver {
            generation: session.generation,
            started_at,
            deadline,
            budget,
            task,
        });
    }

    fn cancel_driver(session: &mut Session) {
        if let Some(driver) = session.driver.take() {
            driver.cancel();
        }
        session.generation += 1;
    }

    fn publish_state(&self, session: &mut Session, state: SessionState) {
        session.state = state.clone();
        self.shared.state_tx.send_replace(state);
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.shared.session.lock().unwrap_or_else(|poisoned| {
            warn!("Session lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
