//! Frame Timer - A frame-synchronized countdown timer
//!
//! This is the main entry point: it attaches a timer to the reference tick loop
//! and reports its timeouts until it stops or a shutdown signal arrives.

use tokio::sync::broadcast;
use tracing::{info, warn};

use frame_timer::{
    config::Config,
    services::{broadcast_listener, Attachment, SharedRegistry, TimeoutRecord},
    state::CountdownTimer,
    tasks::TickLoop,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("frame_timer={}", config.log_level()))
        .init();

    info!("Starting frame-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: wait_time={}s, max_repeats={}, source={}, physics={}Hz, idle={}Hz",
        config.wait_time, config.max_repeats, config.source, config.physics_hz, config.idle_hz
    );

    let mut timer = CountdownTimer::with_settings(config.settings())?;

    // Report timeouts from a separate task
    let (timeout_tx, mut timeout_rx) = broadcast::channel(64);
    timer.connect_timeout(broadcast_listener(timeout_tx));
    let json = config.json;
    let reporter = tokio::spawn(async move {
        loop {
            match timeout_rx.recv().await {
                Ok(event) => {
                    let record = TimeoutRecord::now(event);
                    if json {
                        match serde_json::to_string(&record) {
                            Ok(line) => println!("{}", line),
                            Err(e) => warn!("Failed to serialize timeout: {}", e),
                        }
                    } else {
                        info!(
                            "Timeout at {}: repeat_index={}, stopped={}",
                            record.at.to_rfc3339(),
                            event.repeat_index,
                            event.stopped
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    warn!("Timeout reporter lagged, {} events dropped", missed);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let registry = SharedRegistry::new();
    timer.attach(Attachment::new(registry.clone()))?;
    if config.manual {
        timer.start(None)?;
    }

    let tick_loop = TickLoop::new(config.tick_rates(), timer.snapshot());
    let outcome = tick_loop.run(&mut timer, &registry, shutdown_signal()).await;

    if json {
        println!("{}", serde_json::to_string(&timer.snapshot())?);
    }

    // Closing the listener ends the reporter once it has drained
    drop(timer);
    if let Err(e) = reporter.await {
        warn!("Timeout reporter failed: {}", e);
    }

    info!(
        "Timer {}: physics_ticks={}, idle_ticks={}",
        if outcome.finished { "finished" } else { "interrupted" },
        outcome.physics_ticks,
        outcome.idle_ticks
    );
    Ok(())
}
