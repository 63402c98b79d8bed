//! Scheduling context a timer is attached to

use super::TickRegistry;

type AutostartGate = Box<dyn Fn() -> bool + Send>;

/// Everything a timer needs from its scheduling context.
///
/// Holding an attachment is what makes a timer "attached"; `start` is rejected without one.
pub struct Attachment {
    pub(crate) registry: Box<dyn TickRegistry + Send>,
    suppress_autostart: Option<AutostartGate>,
}

impl Attachment {
    pub fn new(registry: impl TickRegistry + Send + 'static) -> Self {
        Self {
            registry: Box::new(registry),
            suppress_autostart: None,
        }
    }

    /// Suppress autostart while `predicate` returns true, e.g. in a design-time context.
    ///
    /// The predicate is consulted once, when the attachment is applied.
    pub fn suppress_autostart_when(mut self, predicate: impl Fn() -> bool + Send + 'static) -> Self {
        self.suppress_autostart = Some(Box::new(predicate));
        self
    }

    pub(crate) fn autostart_suppressed(&self) -> bool {
        self.suppress_autostart.as_ref().is_some_and(|predicate| predicate())
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("suppress_autostart", &self.suppress_autostart.is_some())
            .finish_non_exhaustive()
    }
}
