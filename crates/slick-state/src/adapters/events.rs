use crate::events::SocialEvent;
use crate::ports::EventPublisher;
use parking_lot::Mutex;

/// Append-only event log.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<SocialEvent>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every event published so far.
    pub fn events(&self) -> Vec<SocialEvent> {
        self.events.lock().clone()
    }

    /// Take every event published so far, leaving the log empty.
    pub fn drain(&self) -> Vec<SocialEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventPublisher for InMemoryEventLog {
    fn publish(&self, events: Vec<SocialEvent>) {
        self.events.lock().extend(events);
    }
}

/// Publisher that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPublisher;

impl EventPublisher for NoopPublisher {
    fn publish(&self, _events: Vec<SocialEvent>) {}
}
