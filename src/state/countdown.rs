//! Countdown timer state machine
//!
//! A `CountdownTimer` is advanced by an external scheduler through [`CountdownTimer::on_tick`].
//! It consumes deltas only from its configured [`TickSource`], and only while armed and not
//! paused. When the remaining time crosses zero it either rearms, carrying the overshoot into
//! the next cycle, or stops, and raises a single timeout either way.
//!
//! # Lifecycle
//!
//! 1. Create and configure the timer
//! 2. [`attach`](CountdownTimer::attach) it to a scheduling context (honours autostart)
//! 3. [`start`](CountdownTimer::start) arms it and subscribes to its tick channel
//! 4. The timer disarms on [`stop`](CountdownTimer::stop) or once its repeats are exhausted

use tracing::{debug, info};

use super::{TickSource, TimerSettings, TimerSnapshot, TimerStatus};
use crate::{
    error::TimerError,
    services::{
        notify::Listeners, wait_time_warnings, Attachment, ListenerId, LogWarnings, TimeoutEvent,
        WarningSink,
    },
};

/// Remaining time used as the "stopped" sentinel
const STOPPED_TIME_LEFT: f64 = -1.0;

/// A frame-synchronized countdown timer
pub struct CountdownTimer {
    wait_time: f64,
    max_repeats: i32,
    repeat_index: i32,
    time_left: f64,
    autostart: bool,
    paused: bool,
    armed: bool,
    tick_source: TickSource,

    /// Channel currently registered with the attachment's registry
    subscribed: Option<TickSource>,
    attachment: Option<Attachment>,
    listeners: Listeners,
    warning_sink: Option<Box<dyn WarningSink + Send>>,
}

impl CountdownTimer {
    /// Create a stopped timer with a one second wait time that repeats forever
    pub fn new() -> Self {
        let defaults = TimerSettings::default();
        Self {
            wait_time: defaults.wait_time,
            max_repeats: defaults.max_repeats,
            repeat_index: -1,
            time_left: STOPPED_TIME_LEFT,
            autostart: defaults.autostart,
            paused: false,
            armed: false,
            tick_source: defaults.tick_source,
            subscribed: None,
            attachment: None,
            listeners: Listeners::default(),
            warning_sink: Some(Box::new(LogWarnings)),
        }
    }

    /// Create a timer from settings, validating every field
    pub fn with_settings(settings: TimerSettings) -> Result<Self, TimerError> {
        let mut timer = Self::new();
        timer.set_wait_time(settings.wait_time)?;
        timer.set_max_repeats(settings.max_repeats)?;
        timer.set_tick_source(settings.tick_source);
        timer.set_autostart(settings.autostart);
        Ok(timer)
    }

    // ─── Configuration ──────────────────────────────────────────────────────

    pub fn set_wait_time(&mut self, wait_time: f64) -> Result<(), TimerError> {
        // Also rejects NaN
        if !(wait_time > 0.0) {
            return Err(TimerError::InvalidWaitTime(wait_time));
        }
        self.wait_time = wait_time;
        self.update_configuration_warnings();
        Ok(())
    }

    pub fn wait_time(&self) -> f64 {
        self.wait_time
    }

    pub fn set_max_repeats(&mut self, max_repeats: i32) -> Result<(), TimerError> {
        if max_repeats < -1 {
            return Err(TimerError::InvalidMaxRepeats(max_repeats));
        }
        self.max_repeats = max_repeats;
        self.update_configuration_warnings();
        Ok(())
    }

    pub fn max_repeats(&self) -> i32 {
        self.max_repeats
    }

    pub fn set_autostart(&mut self, autostart: bool) {
        self.autostart = autostart;
    }

    pub fn has_autostart(&self) -> bool {
        self.autostart
    }

    /// Replace the sink that receives configuration warnings, or silence them with `None`
    pub fn set_warning_sink(&mut self, sink: Option<Box<dyn WarningSink + Send>>) {
        self.warning_sink = sink;
    }

    /// Advisory warnings for the current configuration
    pub fn configuration_warnings(&self) -> Vec<String> {
        wait_time_warnings(self.wait_time)
    }

    fn update_configuration_warnings(&mut self) {
        let warnings = self.configuration_warnings();
        if let Some(sink) = self.warning_sink.as_mut() {
            sink.refresh(&warnings);
        }
    }

    // ─── Attachment ─────────────────────────────────────────────────────────

    /// Attach the timer to a scheduling context, replacing any previous one.
    ///
    /// An armed timer resubscribes to its channel. A pending autostart arms the timer
    /// and is consumed, unless the attachment suppresses it, in which case it stays set.
    pub fn attach(&mut self, attachment: Attachment) -> Result<(), TimerError> {
        self.detach();

        let suppressed = attachment.autostart_suppressed();
        self.attachment = Some(attachment);
        self.sync_subscription();

        if self.autostart {
            if suppressed {
                debug!("Autostart suppressed by scheduling context");
            } else {
                self.start(None)?;
                self.autostart = false;
            }
        }
        Ok(())
    }

    /// Withdraw the subscription and release the scheduling context.
    ///
    /// Armed and paused state are kept, so attaching again resumes the countdown.
    pub fn detach(&mut self) {
        if let Some(mut attachment) = self.attachment.take() {
            if let Some(source) = self.subscribed.take() {
                attachment.registry.unsubscribe(source);
            }
            debug!("Timer detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    // ─── Control ────────────────────────────────────────────────────────────

    /// Arm the timer, optionally replacing the wait time first.
    ///
    /// A non-positive `override_time` is ignored. A timer configured for zero repeats
    /// never engages: it is stopped straight away and never fires.
    pub fn start(&mut self, override_time: Option<f64>) -> Result<(), TimerError> {
        if !self.is_attached() {
            return Err(TimerError::NotAttached);
        }

        if let Some(time) = override_time.filter(|&time| time > 0.0) {
            self.set_wait_time(time)?;
        }

        if self.max_repeats == 0 {
            debug!("Timer has zero repeats, not engaging");
            self.stop();
            return Ok(());
        }

        self.repeat_index = -1;
        self.time_left = self.wait_time;
        self.armed = true;
        self.sync_subscription();

        info!(
            "Timer started: wait_time={}s, max_repeats={}, source={}",
            self.wait_time, self.max_repeats, self.tick_source
        );
        Ok(())
    }

    /// Disarm the timer and consume any pending autostart
    pub fn stop(&mut self) {
        self.time_left = STOPPED_TIME_LEFT;
        self.repeat_index = self.max_repeats;
        self.armed = false;
        self.sync_subscription();
        self.autostart = false;
        debug!("Timer stopped");
    }

    /// Freeze or resume the countdown without touching remaining time or repeat index
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        self.sync_subscription();
        debug!("Timer {}", if paused { "paused" } else { "resumed" });
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Move the timer to another tick channel
    pub fn set_tick_source(&mut self, source: TickSource) {
        if self.tick_source == source {
            return;
        }
        self.tick_source = source;
        self.sync_subscription();
    }

    pub fn tick_source(&self) -> TickSource {
        self.tick_source
    }

    // ─── Ticking ────────────────────────────────────────────────────────────

    /// Consume one tick from `source`.
    ///
    /// Ticks from the other channel, or while disarmed or paused, are ignored.
    /// At most one timeout is raised per call, however far `delta` overshoots.
    pub fn on_tick(&mut self, delta: f64, source: TickSource) {
        if !self.armed || self.paused || source != self.tick_source || self.subscribed.is_none() {
            return;
        }

        self.time_left -= delta;
        // Strictly below zero; a NaN remainder never counts as a crossing
        if !(self.time_left < 0.0) {
            return;
        }

        if self.has_repeat_left() {
            self.time_left += self.wait_time;
            self.repeat_index += 1;
        } else {
            self.stop();
        }

        let event = TimeoutEvent {
            repeat_index: self.repeat_index,
            stopped: !self.armed,
        };
        debug!("Timeout: repeat_index={}, stopped={}", event.repeat_index, event.stopped);
        self.listeners.emit(event);
    }

    /// Whether the firing in progress leaves another cycle in this run
    fn has_repeat_left(&self) -> bool {
        self.max_repeats == -1 || self.repeat_index + 1 < self.max_repeats - 1
    }

    // ─── Notification ───────────────────────────────────────────────────────

    /// Register a callback invoked on every timeout, in connection order
    pub fn connect_timeout(&mut self, callback: impl FnMut(TimeoutEvent) + Send + 'static) -> ListenerId {
        self.listeners.connect(Box::new(callback))
    }

    /// Remove a callback; returns false if it was not connected
    pub fn disconnect_timeout(&mut self, id: ListenerId) -> bool {
        self.listeners.disconnect(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    pub fn is_stopped(&self) -> bool {
        self.time_left() <= 0.0
    }

    /// Remaining time in the current cycle, never negative
    pub fn time_left(&self) -> f64 {
        if self.time_left > 0.0 {
            self.time_left
        } else {
            0.0
        }
    }

    pub fn repeat_index(&self) -> i32 {
        self.repeat_index
    }

    /// Firings left in the run; the configured value is passed through when it is 0 or -1.
    ///
    /// Right after `start` the index is -1, so this reads one higher than the number
    /// of timeouts still to come.
    pub fn repeats_left(&self) -> i32 {
        if self.max_repeats > 0 {
            self.max_repeats - self.repeat_index
        } else {
            self.max_repeats
        }
    }

    /// Check if the timer is consuming, or would consume once resumed, ticks
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Channel the timer is currently subscribed to, if any
    pub fn subscription(&self) -> Option<TickSource> {
        self.subscribed
    }

    pub fn status(&self) -> TimerStatus {
        match (self.armed, self.paused) {
            (false, _) => TimerStatus::Stopped,
            (true, true) => TimerStatus::Paused,
            (true, false) => TimerStatus::Running,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            status: self.status(),
            wait_time: self.wait_time,
            time_left: self.time_left(),
            max_repeats: self.max_repeats,
            repeat_index: self.repeat_index,
            repeats_left: self.repeats_left(),
            tick_source: self.tick_source,
            autostart: self.autostart,
        }
    }

    /// Bring the registry in line with `armed && !paused` on the configured channel.
    ///
    /// The only place subscriptions change, so at most one channel is ever registered.
    fn sync_subscription(&mut self) {
        let wanted = (self.armed && !self.paused).then_some(self.tick_source);
        if wanted == self.subscribed {
            return;
        }
        let Some(attachment) = self.attachment.as_mut() else {
            return;
        };

        if let Some(old) = self.subscribed.take() {
            attachment.registry.unsubscribe(old);
        }
        if let Some(new) = wanted {
            attachment.registry.subscribe(new);
            self.subscribed = Some(new);
        }
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("wait_time", &self.wait_time)
            .field("max_repeats", &self.max_repeats)
            .field("repeat_index", &self.repeat_index)
            .field("time_left", &self.time_left)
            .field("autostart", &self.autostart)
            .field("paused", &self.paused)
            .field("armed", &self.armed)
            .field("tick_source", &self.tick_source)
            .field("subscribed", &self.subscribed)
            .field("attached", &self.attachment.is_some())
            .field("listeners", &self.listeners)
            .finish()
    }
}
