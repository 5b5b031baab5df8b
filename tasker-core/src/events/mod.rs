//! Event system for tasker agents

pub mod memory;
pub mod sink;
pub mod types;

pub use memory::{EventSeq, MemorySink, RecordedEvent};
pub use sink::{EventSink, TracingSink};
pub use types::{AgentEvent, EventLevel};
