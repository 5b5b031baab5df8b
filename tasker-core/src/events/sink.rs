//! EventSink trait definition
//!
//! Agents report lifecycle and task events through an injected sink
//! instead of a process-wide logger registry.

use tracing::{debug, error, info, warn};

use super::types::{AgentEvent, EventLevel};

/// Destination for agent events
pub trait EventSink: Send + Sync {
    /// Record one event emitted by the agent with the given id
    fn emit(&self, agent_id: &str, event: &AgentEvent);
}

/// Forwards agent events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, agent_id: &str, event: &AgentEvent) {
        let kind = event.kind();
        let task_id = event.task_id().map(|id| id.to_string());
        let task_id = task_id.as_deref().unwrap_or("");

        match event.level() {
            EventLevel::Debug => debug!(agent_id, kind, task_id, "{event}"),
            EventLevel::Info => info!(agent_id, kind, task_id, "{event}"),
            EventLevel::Warn => warn!(agent_id, kind, task_id, "{event}"),
            EventLevel::Error => error!(agent_id, kind, task_id, "{event}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Verify that the EventSink trait is object-safe
    fn _assert_object_safe(_: Arc<dyn EventSink>) {}

    #[test]
    fn tracing_sink_accepts_every_level_without_subscriber() {
        let sink = TracingSink;
        sink.emit("a1", &AgentEvent::Idle);
        sink.emit("a1", &AgentEvent::Running);
        sink.emit(
            "a1",
            &AgentEvent::LoopFault {
                error: "x".to_string(),
            },
        );
    }
}
