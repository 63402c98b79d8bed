//! Configuration warnings

use tracing::warn;

/// Waits shorter than this are unreliable at common frame rates
pub const MIN_RELIABLE_WAIT_TIME: f64 = 0.05;

/// Tolerance applied when comparing against [`MIN_RELIABLE_WAIT_TIME`]
pub const WAIT_TIME_EPSILON: f64 = 0.00001;

pub const LOW_WAIT_TIME_WARNING: &str = "Very low timer wait times (< 0.05 seconds) may behave in \
significantly different ways depending on the rendered or physics frame rate. \
Consider driving the logic from the frame loop directly instead of a timer.";

/// Receives recomputed configuration warnings whenever a setting changes
pub trait WarningSink {
    fn refresh(&mut self, warnings: &[String]);
}

/// Sink that reports warnings through `tracing`
#[derive(Debug, Default)]
pub struct LogWarnings;

impl WarningSink for LogWarnings {
    fn refresh(&mut self, warnings: &[String]) {
        for warning in warnings {
            warn!("Timer configuration: {}", warning);
        }
    }
}

/// Compute advisory warnings for a wait time
pub fn wait_time_warnings(wait_time: f64) -> Vec<String> {
    let mut warnings = Vec::new();
    if wait_time < MIN_RELIABLE_WAIT_TIME - WAIT_TIME_EPSILON {
        warnings.push(LOW_WAIT_TIME_WARNING.to_string());
    }
    warnings
}
