//! Error types for timer operations

use thiserror::Error;

/// Broad classification of a [`TimerError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A setter received a value outside its accepted range
    InvalidArgument,
    /// The timer is not in a state where the call is allowed
    PreconditionViolation,
}

/// Errors raised by [`CountdownTimer`](crate::CountdownTimer) operations.
///
/// Every rejection leaves the timer untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimerError {
    #[error("wait time should be greater than zero (got {0})")]
    InvalidWaitTime(f64),

    #[error("max repeats should be equal to or greater than -1 (got {0})")]
    InvalidMaxRepeats(i32),

    #[error("timer is not attached to a scheduling context; attach it or enable autostart")]
    NotAttached,
}

impl TimerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidWaitTime(_) | Self::InvalidMaxRepeats(_) => ErrorKind::InvalidArgument,
            Self::NotAttached => ErrorKind::PreconditionViolation,
        }
    }
}
