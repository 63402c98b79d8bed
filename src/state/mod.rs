//! Timer state module
//!
//! This module contains the countdown state machine and the types describing its state.

pub mod countdown;
pub mod tick_source;
pub mod timer_state;


// Re-export main types
pub use countdown::CountdownTimer;
pub use tick_source::TickSource;
pub use timer_state::{TimerSettings, TimerSnapshot, TimerStatus};
