//! Tick subscription registry

use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::state::TickSource;

/// Subscription service through which a timer enables or disables tick delivery.
///
/// The scheduler only delivers ticks for channels a timer has subscribed to.
pub trait TickRegistry {
    fn subscribe(&mut self, source: TickSource);
    fn unsubscribe(&mut self, source: TickSource);
}

/// Channels currently subscribed, as seen by the scheduler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Subscriptions {
    pub physics: bool,
    pub idle: bool,
    /// Number of subscribe/unsubscribe calls received
    pub changes: u64,
}

impl Subscriptions {
    pub fn is_subscribed(&self, source: TickSource) -> bool {
        match source {
            TickSource::Physics => self.physics,
            TickSource::Idle => self.idle,
        }
    }

    /// The single subscribed channel, if any
    pub fn active(&self) -> Option<TickSource> {
        TickSource::ALL.into_iter().find(|&source| self.is_subscribed(source))
    }

    fn set(&mut self, source: TickSource, on: bool) {
        match source {
            TickSource::Physics => self.physics = on,
            TickSource::Idle => self.idle = on,
        }
        self.changes += 1;
    }
}

/// Registry shared between a timer and the scheduler that drives it
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<Subscriptions>>,
}

impl SharedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current subscriptions
    pub fn snapshot(&self) -> Result<Subscriptions, String> {
        self.inner
            .lock()
            .map(|subs| *subs)
            .map_err(|e| format!("Failed to lock tick registry: {}", e))
    }

    /// Check whether ticks should be delivered on a channel
    pub fn is_subscribed(&self, source: TickSource) -> bool {
        self.snapshot()
            .map(|subs| subs.is_subscribed(source))
            .unwrap_or(false)
    }

    fn update(&self, source: TickSource, on: bool) {
        match self.inner.lock() {
            Ok(mut subs) => {
                subs.set(source, on);
                debug!("{} channel {}", source, if on { "subscribed" } else { "unsubscribed" });
            }
            Err(e) => warn!("Failed to lock tick registry: {}", e),
        }
    }
}

impl TickRegistry for SharedRegistry {
    fn subscribe(&mut self, source: TickSource) {
        self.update(source, true);
    }

    fn unsubscribe(&mut self, source: TickSource) {
        self.update(source, false);
    }
}
