//! Background tasks module
//! 
//! This module contains the tasks that run alongside the controller.

pub mod countdown_driver;

// Re-export main functions
pub use countdown_driver::{countdown_driver_task, DriverPlan, TickOutcome};
