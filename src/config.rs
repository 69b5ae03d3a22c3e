//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::{
    display::ClockFace,
    state::{controller::SMOOTH_TICK_INTERVAL, SessionSettings},
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "countdown-timer")]
#[command(about = "A countdown timer service with an observable timer session")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Interval between countdown ticks in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// Tick at animation frame rate, overrides --tick-ms
    #[arg(long)]
    pub smooth: bool,

    /// Hours on the displayed clock face
    #[arg(long, value_enum, default_value = "24")]
    pub clock_face: ClockFace,

    /// Delay before a started countdown begins, in milliseconds
    #[arg(long, default_value = "300")]
    pub start_delay_ms: u64,

    /// Keep finished timers in a done state until stopped
    #[arg(long)]
    pub hold_on_finish: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_interval(&self) -> Duration {
        if self.smooth {
            SMOOTH_TICK_INTERVAL
        } else {
            Duration::from_millis(self.tick_ms)
        }
    }

    /// Controller settings derived from the flags
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            tick_interval: self.tick_interval(),
            start_delay: Duration::from_millis(self.start_delay_ms),
            hold_on_finish: self.hold_on_finish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["countdown-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.clock_face, ClockFace::TwentyFourHour);

        let settings = config.session_settings();
        assert_eq!(settings.tick_interval, Duration::from_secs(1));
        assert_eq!(settings.start_delay, Duration::from_millis(300));
        assert!(!settings.hold_on_finish);
    }

    #[test]
    fn smooth_overrides_tick_ms() {
        let config =
            Config::try_parse_from(["countdown-timer", "--tick-ms", "250", "--smooth"]).unwrap();
        assert_eq!(config.tick_interval(), SMOOTH_TICK_INTERVAL);
    }

    #[test]
    fn twelve_hour_face_and_hold() {
        let config = Config::try_parse_from([
            "countdown-timer",
            "--clock-face",
            "12",
            "--hold-on-finish",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.clock_face, ClockFace::TwelveHour);
        assert!(config.session_settings().hold_on_finish);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_zero_tick() {
        assert!(Config::try_parse_from(["countdown-timer", "--tick-ms", "0"]).is_err());
    }
}
