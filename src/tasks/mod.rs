//! Background tasks module
//!
//! This module contains the reference scheduler that delivers ticks to a timer.

pub mod tick_loop;

// Re-export main types
pub use tick_loop::{LoopOutcome, TickLoop, TickRates};
