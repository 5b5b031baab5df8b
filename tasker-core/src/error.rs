//! Error types for tasker-core

use std::path::PathBuf;

use thiserror::Error;

use crate::agent::{TaskId, TaskStatus};

/// Result alias for agent operations
pub type AgentResult<T> = Result<T, AgentError>;

/// Errors surfaced by agent operations
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Task queue full (max: {max})")]
    QueueFull { max: usize },

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Task {id} is not pending (status: {status})")]
    TaskNotPending { id: TaskId, status: TaskStatus },

    #[error("Processor preparation failed: {0}")]
    Prepare(#[source] ProcessError),

    #[error("Restoring {restored} saved tasks onto {queued} queued would exceed max_tasks ({max})")]
    RestoreOverflow {
        restored: usize,
        queued: usize,
        max: usize,
    },

    #[error("Snapshot belongs to agent '{found}', not '{expected}'")]
    SnapshotMismatch { expected: String, found: String },

    #[error("Snapshot store error: {0}")]
    Store(#[from] StoreError),
}

/// Faults raised while processing a single task
///
/// These never escape the agent: the display string is recorded in the
/// task's `error` field and drives the retry policy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("{0}")]
    Failed(String),

    #[error("no handler registered for task type '{0}'")]
    UnknownTaskType(String),

    #[error("processor panicked: {0}")]
    Panicked(String),
}

impl ProcessError {
    /// Shorthand for a plain processing failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Errors from snapshot stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access snapshot {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Snapshot serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}
