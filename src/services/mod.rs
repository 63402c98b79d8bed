//! External collaborator module
//!
//! This module contains the interfaces the timer calls into (tick subscription,
//! timeout notification, configuration warnings, attachment) and reference
//! implementations of each.

pub mod attachment;
pub mod notify;
pub mod registry;
pub mod warnings;

// Re-export main types
pub use attachment::Attachment;
pub use notify::{broadcast_listener, ListenerId, TimeoutEvent, TimeoutRecord};
pub use registry::{SharedRegistry, Subscriptions, TickRegistry};
pub use warnings::{wait_time_warnings, LogWarnings, WarningSink};
