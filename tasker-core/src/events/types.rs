//! Event type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::agent::TaskId;

/// Severity attached to each agent event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Lifecycle and task events emitted by an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// Agent constructed
    Created { agent_type: String },

    /// `initialize` started
    Initializing,

    /// `initialize` succeeded
    Initialized,

    /// `initialize` failed; the agent is in the error state
    InitializationFailed { error: String },

    /// Tasks restored from a persisted snapshot
    Restored { queued: usize, completed: usize },

    /// Run loop entered the active state
    Running,

    TaskQueued { task_id: TaskId, task_type: String },

    TaskProcessing { task_id: TaskId },

    TaskCompleted { task_id: TaskId },

    /// A processing attempt faulted
    TaskFailed {
        task_id: TaskId,
        error: String,
        retries: u32,
        will_retry: bool,
    },

    TaskCancelled { task_id: TaskId },

    /// Queue drained; loop exited normally
    Idle,

    /// Interrupt handle observed; loop exited
    Interrupted,

    /// Unexpected fault in the run loop
    LoopFault { error: String },

    /// Agent finalized
    Terminated { processed: usize },
}

impl AgentEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            Self::InitializationFailed { .. } | Self::LoopFault { .. } => EventLevel::Error,
            Self::TaskFailed { will_retry, .. } => {
                if *will_retry {
                    EventLevel::Warn
                } else {
                    EventLevel::Error
                }
            }
            Self::Idle => EventLevel::Debug,
            _ => EventLevel::Info,
        }
    }

    /// Stable snake_case name, matching the serialized `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Initializing => "initializing",
            Self::Initialized => "initialized",
            Self::InitializationFailed { .. } => "initialization_failed",
            Self::Restored { .. } => "restored",
            Self::Running => "running",
            Self::TaskQueued { .. } => "task_queued",
            Self::TaskProcessing { .. } => "task_processing",
            Self::TaskCompleted { .. } => "task_completed",
            Self::TaskFailed { .. } => "task_failed",
            Self::TaskCancelled { .. } => "task_cancelled",
            Self::Idle => "idle",
            Self::Interrupted => "interrupted",
            Self::LoopFault { .. } => "loop_fault",
            Self::Terminated { .. } => "terminated",
        }
    }

    /// Task this event refers to, if any
    pub fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::TaskQueued { task_id, .. }
            | Self::TaskProcessing { task_id }
            | Self::TaskCompleted { task_id }
            | Self::TaskFailed { task_id, .. }
            | Self::TaskCancelled { task_id } => Some(*task_id),
            _ => None,
        }
    }
}

impl fmt::Display for AgentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { agent_type } => write!(f, "Agent created with type {agent_type}"),
            Self::Initializing => f.write_str("Initializing agent"),
            Self::Initialized => f.write_str("Agent initialized successfully"),
            Self::InitializationFailed { error } => write!(f, "Initialization failed: {error}"),
            Self::Restored { queued, completed } => write!(
                f,
                "Restored {queued} queued and {completed} finished tasks from snapshot"
            ),
            Self::Running => f.write_str("Agent running"),
            Self::TaskQueued { task_id, task_type } => {
                write!(f, "Task {task_id} queued: {task_type}")
            }
            Self::TaskProcessing { task_id } => write!(f, "Processing task {task_id}"),
            Self::TaskCompleted { task_id } => write!(f, "Task {task_id} completed"),
            Self::TaskFailed {
                task_id,
                error,
                retries,
                will_retry,
            } => {
                write!(f, "Task {task_id} failed: {error} (attempt {retries})")?;
                if *will_retry {
                    f.write_str(", re-queued")
                } else {
                    f.write_str(", giving up")
                }
            }
            Self::TaskCancelled { task_id } => write!(f, "Task {task_id} cancelled"),
            Self::Idle => f.write_str("Queue empty, agent idle"),
            Self::Interrupted => f.write_str("Agent interrupted"),
            Self::LoopFault { error } => write!(f, "Unexpected error in agent loop: {error}"),
            Self::Terminated { processed } => {
                write!(f, "Agent terminated. Processed {processed} tasks")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_serialized_tag() {
        let events = [
            AgentEvent::Created {
                agent_type: "base".to_string(),
            },
            AgentEvent::Running,
            AgentEvent::TaskQueued {
                task_id: TaskId::new(),
                task_type: "greet".to_string(),
            },
            AgentEvent::LoopFault {
                error: "disk full".to_string(),
            },
            AgentEvent::Terminated { processed: 2 },
        ];

        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["type"], event.kind());
        }
    }

    #[test]
    fn failure_level_depends_on_retry() {
        let task_id = TaskId::new();
        let retrying = AgentEvent::TaskFailed {
            task_id,
            error: "boom".to_string(),
            retries: 1,
            will_retry: true,
        };
        let exhausted = AgentEvent::TaskFailed {
            task_id,
            error: "boom".to_string(),
            retries: 3,
            will_retry: false,
        };

        assert_eq!(retrying.level(), EventLevel::Warn);
        assert_eq!(exhausted.level(), EventLevel::Error);
        assert!(exhausted.to_string().contains("giving up"));
    }

    #[test]
    fn task_id_only_on_task_events() {
        let task_id = TaskId::new();
        assert_eq!(AgentEvent::TaskCompleted { task_id }.task_id(), Some(task_id));
        assert_eq!(AgentEvent::Idle.task_id(), None);
    }

    #[test]
    fn terminated_message_reports_count() {
        let event = AgentEvent::Terminated { processed: 4 };
        assert_eq!(event.to_string(), "Agent terminated. Processed 4 tasks");
    }
}
