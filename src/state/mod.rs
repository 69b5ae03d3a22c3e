//! State management module
//! 
//! This module contains the timer catalog, the session state machine and
//! the controller that owns them.

pub mod app_state;
pub mod catalog;
pub mod controller;
pub mod session_state;
pub mod timer;

// Re-export main types
pub use app_state::AppState;
pub use catalog::Catalog;
pub use controller::{SessionController, SessionSettings};
pub use session_state::SessionState;
pub use timer::{Timer, TimerId};
