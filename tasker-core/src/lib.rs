//! tasker-core: single-agent task queue with retry
//!
//! This crate provides the pieces of a tasker agent:
//!
//! - **Agent** - [`Agent`] owns a bounded FIFO queue and a table of finished tasks,
//!   and moves through an explicit [`AgentState`] lifecycle
//! - **Tasks** - [`Task`] records with a [`TaskStatus`] lifecycle and retry counter
//! - **Processors** - the [`TaskProcessor`] hook that turns a task into a result
//! - **Events** - [`EventSink`] receives every [`AgentEvent`] the agent emits
//! - **Snapshots** - [`SnapshotStore`] persists the queue and finished table
//!
//! # Quick Start
//!
//! ```
//! use serde_json::json;
//! use tasker_core::{Agent, AgentConfig, TaskStatus};
//!
//! let mut agent = Agent::new(AgentConfig::new("example").with_persistence(false));
//!
//! let payload = json!({"message": "Hello"}).as_object().cloned().unwrap_or_default();
//! let task_id = agent.queue_task("example_task", payload).unwrap();
//!
//! agent.run();
//!
//! let task = agent.task_status(&task_id).unwrap();
//! assert_eq!(task.status, TaskStatus::Completed);
//! ```
//!
//! # Architecture
//!
//! ```text
//!             queue_task                 run()
//!   caller ───────────────► [ queue ] ──────────► TaskProcessor
//!                              ▲                        │
//!                              │ retry (attempts left)  │
//!                              └────────────────────────┤
//!                                                       ▼
//!                                        [ finished: completed / failed ]
//! ```

pub mod agent;
pub mod error;
pub mod events;
pub mod processor;
pub mod store;

// Re-export key types for convenience
pub use agent::{
    Agent, AgentBuilder, AgentConfig, AgentState, AgentStatusReport, InterruptHandle, Payload,
    RunOutcome, Task, TaskId, TaskStatus,
};
pub use error::{AgentError, AgentResult, ProcessError, StoreError};
pub use events::{AgentEvent, EventLevel, EventSink, MemorySink, TracingSink};
pub use processor::{CompletionProcessor, HandlerRegistry, TaskProcessor};
pub use store::{AgentSnapshot, JsonFileStore, MemoryStore, SnapshotStore};
