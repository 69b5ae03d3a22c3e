//! Countdown Timer - A timer catalog and a single observable countdown session
//! 
//! This library provides the session controller, its countdown driver, the
//! display computations for a ring-style presentation, and an HTTP API
//! through which a presentation layer drives and observes the session.

pub mod config;
pub mod display;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Catalog, SessionController, SessionSettings, SessionState, Timer, TimerId};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
