//! Shared state handed to the HTTP layer

use std::time::Instant;

use super::SessionController;
use crate::display::ClockFace;

/// Controller plus the server metadata the API reports
#[derive(Debug)]
pub struct AppState {
    pub controller: SessionController,
    /// Face used to decompose remaining time for display
    pub clock_face: ClockFace,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(controller: SessionController, clock_face: ClockFace, port: u16, host: String) -> Self {
        Self {
            controller,
            clock_face,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        crate::display::humanize(self.start_time.elapsed())
    }
}
