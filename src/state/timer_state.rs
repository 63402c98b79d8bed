//! Timer settings and observable state snapshots

use serde::{Deserialize, Serialize};

use super::TickSource;

/// Coarse state of a countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Stopped,
    Running,
    Paused,
}

/// Configuration used to build a timer in one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerSettings {
    /// Duration of one cycle in seconds
    pub wait_time: f64,
    /// -1 repeats forever, N fires N times in total
    pub max_repeats: i32,
    pub tick_source: TickSource,
    pub autostart: bool,
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            wait_time: 1.0,
            max_repeats: -1,
            tick_source: TickSource::Idle,
            autostart: false,
        }
    }
}

/// Point-in-time view of a timer, suitable for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: TimerStatus,
    pub wait_time: f64,
    pub time_left: f64,
    pub max_repeats: i32,
    pub repeat_index: i32,
    pub repeats_left: i32,
    pub tick_source: TickSource,
    pub autostart: bool,
}

impl TimerSnapshot {
    /// Check if the timer was counting down when the snapshot was taken
    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    /// Remaining seconds, only while the timer is not stopped
    pub fn remaining_seconds(&self) -> Option<f64> {
        match self.status {
            TimerStatus::Stopped => None,
            _ => Some(self.time_left),
        }
    }
}
