//! Timeout notification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

/// Raised once per tick in which the countdown crossed zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutEvent {
    /// Repeat index after the firing was accounted for
    pub repeat_index: i32,
    /// Whether this firing exhausted the run and stopped the timer
    pub stopped: bool,
}

/// A timeout stamped with wall-clock time, for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeoutRecord {
    #[serde(flatten)]
    pub event: TimeoutEvent,
    pub at: DateTime<Utc>,
}

impl TimeoutRecord {
    pub fn now(event: TimeoutEvent) -> Self {
        Self { event, at: Utc::now() }
    }
}

/// Handle returned when connecting a listener, used to disconnect it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(TimeoutEvent) + Send>;

/// Per-timer list of timeout listeners
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Callback)>,
}

impl Listeners {
    pub(crate) fn connect(&mut self, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, callback));
        id
    }

    pub(crate) fn disconnect(&mut self, id: ListenerId) -> bool {
        let initial_count = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != initial_count
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Deliver in connection order
    pub(crate) fn emit(&mut self, event: TimeoutEvent) {
        for (_, callback) in self.entries.iter_mut() {
            callback(event);
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// Build a listener that forwards timeouts onto a tokio broadcast channel.
///
/// Send failures only mean nobody is listening and are ignored.
pub fn broadcast_listener(tx: broadcast::Sender<TimeoutEvent>) -> impl FnMut(TimeoutEvent) + Send + 'static {
    move |event| {
        if tx.send(event).is_err() {
            trace!("No receivers for timeout event");
        }
    }
}
