//! In-memory EventSink implementation
//!
//! MemorySink keeps every emitted event with a sequence number so callers
//! can inspect what an agent did after the fact.

use std::sync::Mutex;

use super::sink::EventSink;
use super::types::AgentEvent;

/// Sequence number for recorded events (monotonically increasing)
pub type EventSeq = u64;

/// A recorded event
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub seq: EventSeq,
    pub agent_id: String,
    pub event: AgentEvent,
}

/// Event sink that stores events in a Vec
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<RecordedEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events in emission order
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.lock().clone()
    }

    /// Kinds of all recorded events, in order
    pub fn kinds(&self) -> Vec<&'static str> {
        self.lock().iter().map(|r| r.event.kind()).collect()
    }

    /// Events that mention the given task
    pub fn task_events(&self, task_id: crate::agent::TaskId) -> Vec<AgentEvent> {
        self.lock()
            .iter()
            .filter(|r| r.event.task_id() == Some(task_id))
            .map(|r| r.event.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RecordedEvent>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl EventSink for MemorySink {
    fn emit(&self, agent_id: &str, event: &AgentEvent) {
        let mut events = self.lock();
        let seq = events.len() as EventSeq;
        events.push(RecordedEvent {
            seq,
            agent_id: agent_id.to_string(),
            event: event.clone(),
        });
    }
}
