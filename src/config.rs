//! Configuration and CLI argument handling

use clap::Parser;

use crate::{
    state::{TickSource, TimerSettings},
    tasks::TickRates,
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "frame-timer")]
#[command(about = "Run a frame-synchronized countdown timer against a simulated frame loop")]
#[command(version)]
pub struct Config {
    /// Duration of one cycle in seconds
    #[arg(short, long, default_value = "1.0")]
    pub wait_time: f64,

    /// Number of timeouts before stopping; -1 repeats until interrupted
    #[arg(short = 'r', long, default_value = "3", allow_negative_numbers = true)]
    pub max_repeats: i32,

    /// Tick channel that drives the timer
    #[arg(short, long, value_enum, default_value_t = TickSource::Idle)]
    pub source: TickSource,

    /// Fixed physics tick rate
    #[arg(long, default_value = "60")]
    pub physics_hz: u32,

    /// Target idle (frame) tick rate
    #[arg(long, default_value = "60")]
    pub idle_hz: u32,

    /// Do not autostart on attachment; start explicitly instead
    #[arg(long)]
    pub manual: bool,

    /// Print timeouts and snapshots as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Timer settings described by the arguments
    pub fn settings(&self) -> TimerSettings {
        TimerSettings {
            wait_time: self.wait_time,
            max_repeats: self.max_repeats,
            tick_source: self.source,
            autostart: !self.manual,
        }
    }

    pub fn tick_rates(&self) -> TickRates {
        TickRates {
            physics_hz: self.physics_hz,
            idle_hz: self.idle_hz,
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["frame-timer"]).unwrap();
        let settings = config.settings();

        assert_eq!(settings.wait_time, 1.0);
        assert_eq!(settings.max_repeats, 3);
        assert_eq!(settings.tick_source, TickSource::Idle);
        assert!(settings.autostart);
        assert_eq!(config.tick_rates(), TickRates::default());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_infinite_repeats_and_physics() {
        let config = Config::try_parse_from([
            "frame-timer",
            "--max-repeats",
            "-1",
            "--source",
            "physics",
            "--manual",
            "-v",
        ])
        .unwrap();

        assert_eq!(config.max_repeats, -1);
        assert_eq!(config.source, TickSource::Physics);
        assert!(!config.settings().autostart);
        assert_eq!(config.log_level(), "debug");
    }
}
