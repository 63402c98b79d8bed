//! Frame Timer - A frame-synchronized countdown timer
//!
//! This library provides a countdown timer advanced once per physics or idle
//! tick, with bounded or unbounded auto-repeat, pause and tick-source switching,
//! plus a tokio reference scheduler to drive it.

pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorKind, TimerError};
pub use services::{Attachment, SharedRegistry, TimeoutEvent};
pub use state::{CountdownTimer, TickSource, TimerSettings, TimerSnapshot, TimerStatus};
pub use tasks::{TickLoop, TickRates};
pub use utils::signals::shutdown_signal;
