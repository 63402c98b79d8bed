//! Integration tests for the tokio tick loop

use std::{
    future,
    sync::{Arc, Mutex},
    time::Duration,
};

use frame_timer::{
    Attachment, CountdownTimer, SharedRegistry, TickLoop, TickRates, TickSource, TimeoutEvent,
    TimerSettings, TimerStatus,
};

fn timer_with(
    wait_time: f64,
    max_repeats: i32,
    source: TickSource,
) -> (CountdownTimer, SharedRegistry, Arc<Mutex<Vec<TimeoutEvent>>>) {
    let mut timer = CountdownTimer::with_settings(TimerSettings {
        wait_time,
        max_repeats,
        tick_source: source,
        autostart: true,
    })
    .unwrap();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    timer.connect_timeout(move |event| sink.lock().unwrap().push(event));

    let registry = SharedRegistry::new();
    timer.attach(Attachment::new(registry.clone())).unwrap();
    (timer, registry, events)
}

#[tokio::test(start_paused = true)]
async fn test_physics_timer_runs_to_completion() {
    let (mut timer, registry, events) = timer_with(0.5, 2, TickSource::Physics);
    let tick_loop = TickLoop::new(TickRates::default(), timer.snapshot());

    let outcome = tick_loop.run(&mut timer, &registry, future::pending()).await;

    assert!(outcome.finished);
    assert_eq!(outcome.idle_ticks, 0);
    assert!(outcome.physics_ticks >= 60);
    assert_eq!(events.lock().unwrap().len(), 2);
    assert_eq!(timer.status(), TimerStatus::Stopped);
    assert_eq!(registry.snapshot().unwrap().active(), None);
}

#[tokio::test(start_paused = true)]
async fn test_idle_timer_runs_to_completion() {
    let (mut timer, registry, events) = timer_with(0.25, 3, TickSource::Idle);
    let tick_loop = TickLoop::new(TickRates { physics_hz: 30, idle_hz: 120 }, timer.snapshot());

    let outcome = tick_loop.run(&mut timer, &registry, future::pending()).await;

    assert!(outcome.finished);
    assert_eq!(outcome.physics_ticks, 0);
    assert!(outcome.idle_ticks > 0);
    let events = events.lock().unwrap();
    assert_eq!(events.len(), 3);
    assert!(events[2].stopped);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_interrupts_infinite_timer() {
    let (mut timer, registry, events) = timer_with(0.1, -1, TickSource::Physics);
    let tick_loop = TickLoop::new(TickRates::default(), timer.snapshot());

    let outcome = tick_loop
        .run(&mut timer, &registry, tokio::time::sleep(Duration::from_secs(1)))
        .await;

    assert!(!outcome.finished);
    assert_eq!(timer.status(), TimerStatus::Running);
    let fired = events.lock().unwrap().len();
    assert_eq!(fired, 9, "fired {} times", fired);
}

#[tokio::test(start_paused = true)]
async fn test_physics_ticks_start_one_period_in() {
    // 4 Hz makes every physics delta exactly 0.25s
    let (mut timer, registry, events) = timer_with(0.5, -1, TickSource::Physics);
    let tick_loop = TickLoop::new(TickRates { physics_hz: 4, idle_hz: 60 }, timer.snapshot());

    let outcome = tick_loop
        .run(&mut timer, &registry, tokio::time::sleep(Duration::from_millis(600)))
        .await;

    // Ticks at 0.25s and 0.5s bring the timer to exactly zero, which is not a crossing
    assert_eq!(outcome.physics_ticks, 2);
    assert!(events.lock().unwrap().is_empty());

    let outcome = tick_loop
        .run(&mut timer, &registry, tokio::time::sleep(Duration::from_millis(300)))
        .await;

    assert_eq!(outcome.physics_ticks, 1);
    assert_eq!(events.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_snapshots_follow_repeats() {
    let (mut timer, registry, _) = timer_with(0.5, 2, TickSource::Physics);
    let tick_loop = TickLoop::new(TickRates::default(), timer.snapshot());
    let snapshots = tick_loop.subscribe_snapshots();

    tick_loop.run(&mut timer, &registry, future::pending()).await;

    let last = snapshots.borrow().clone();
    assert_eq!(last.status, TimerStatus::Stopped);
    assert_eq!(last.repeats_left, 0);
    assert_eq!(last.remaining_seconds(), None);
}

#[tokio::test(start_paused = true)]
async fn test_unstarted_timer_exits_immediately() {
    let mut timer = CountdownTimer::new();
    let registry = SharedRegistry::new();
    timer.attach(Attachment::new(registry.clone())).unwrap();
    let tick_loop = TickLoop::new(TickRates::default(), timer.snapshot());

    let outcome = tick_loop.run(&mut timer, &registry, future::pending()).await;

    assert!(outcome.finished);
    assert_eq!(outcome.physics_ticks + outcome.idle_ticks, 0);
}
