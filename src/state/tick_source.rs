//! Tick channel selection

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The scheduling channel that drives a timer.
///
/// `Physics` ticks arrive at a fixed rate, `Idle` ticks once per rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TickSource {
    Physics,
    #[default]
    Idle,
}

impl TickSource {
    pub const ALL: [TickSource; 2] = [TickSource::Physics, TickSource::Idle];

    pub fn as_str(&self) -> &'static str {
        match self {
            TickSource::Physics => "physics",
            TickSource::Idle => "idle",
        }
    }
}

impl fmt::Display for TickSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
