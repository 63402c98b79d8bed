//! Reference scheduler that drives a timer from tokio intervals

use std::{future::Future, time::Duration};

use tokio::{
    sync::watch,
    time::{interval, interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, info};

use crate::{
    services::SharedRegistry,
    state::{CountdownTimer, TickSource, TimerSnapshot},
};

/// Tick rates for the two channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRates {
    /// Fixed physics rate; every physics tick carries `1 / physics_hz` seconds
    pub physics_hz: u32,
    /// Target frame rate; idle ticks carry the time actually elapsed
    pub idle_hz: u32,
}

impl Default for TickRates {
    fn default() -> Self {
        Self {
            physics_hz: 60,
            idle_hz: 60,
        }
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopOutcome {
    pub physics_ticks: u64,
    pub idle_ticks: u64,
    /// True when the timer stopped on its own, false when shut down from outside
    pub finished: bool,
}

/// Delivers physics and idle ticks to a timer for as long as it runs
#[derive(Debug)]
pub struct TickLoop {
    rates: TickRates,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl TickLoop {
    pub fn new(rates: TickRates, initial: TimerSnapshot) -> Self {
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);
        Self {
            rates,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Watch snapshots published whenever status or repeat index changes
    pub fn subscribe_snapshots(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Drive `timer` until it stops or `shutdown` resolves.
    ///
    /// Only channels `registry` reports as subscribed receive ticks.
    pub async fn run<F>(&self, timer: &mut CountdownTimer, registry: &SharedRegistry, shutdown: F) -> LoopOutcome
    where
        F: Future<Output = ()>,
    {
        info!(
            "Starting tick loop: physics={}Hz, idle={}Hz",
            self.rates.physics_hz, self.rates.idle_hz
        );

        let physics_period = period(self.rates.physics_hz);
        let physics_delta = physics_period.as_secs_f64();
        // First physics step lands one period in, so it never carries time that has not elapsed
        let mut physics = interval_at(Instant::now() + physics_period, physics_period);
        physics.set_missed_tick_behavior(MissedTickBehavior::Burst);

        let mut idle = interval(period(self.rates.idle_hz));
        idle.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_idle = Instant::now();

        let mut outcome = LoopOutcome::default();
        let mut last_published = (timer.status(), timer.repeat_index());
        self.publish(timer);

        tokio::pin!(shutdown);

        loop {
            if !timer.is_armed() {
                debug!("Timer is stopped, leaving tick loop");
                outcome.finished = true;
                break;
            }

            tokio::select! {
                _ = physics.tick() => {
                    if registry.is_subscribed(TickSource::Physics) {
                        outcome.physics_ticks += 1;
                        timer.on_tick(physics_delta, TickSource::Physics);
                    }
                }

                now = idle.tick() => {
                    let delta = now.saturating_duration_since(last_idle).as_secs_f64();
                    last_idle = now;
                    if registry.is_subscribed(TickSource::Idle) {
                        outcome.idle_ticks += 1;
                        timer.on_tick(delta, TickSource::Idle);
                    }
                }

                _ = &mut shutdown => {
                    info!("Shutdown requested, leaving tick loop");
                    break;
                }
            }

            let current = (timer.status(), timer.repeat_index());
            if current != last_published {
                last_published = current;
                self.publish(timer);
            }
        }

        self.publish(timer);
        info!(
            "Tick loop finished: physics_ticks={}, idle_ticks={}",
            outcome.physics_ticks, outcome.idle_ticks
        );
        outcome
    }

    fn publish(&self, timer: &CountdownTimer) {
        // send_replace never fails, even with no receivers left
        self.snapshot_tx.send_replace(timer.snapshot());
    }
}

fn period(hz: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(hz.max(1)))
}
