//! TaskProcessor trait definition
//!
//! The processor is the pluggable unit of work an agent runs for each task.

use serde_json::Value;

use crate::agent::Task;
use crate::error::ProcessError;

/// Turns a task into a result value
///
/// Implementations run synchronously; the agent never calls `process`
/// concurrently. An `Err` (or a panic) counts as a failed attempt and feeds
/// the agent's retry policy.
///
/// # Object Safety
///
/// This trait is designed to be object-safe, allowing `Box<dyn TaskProcessor>`.
pub trait TaskProcessor: Send {
    /// Called once from `Agent::initialize`. A failure puts the agent in the
    /// error state and the run loop never starts.
    fn prepare(&mut self) -> Result<(), ProcessError> {
        Ok(())
    }

    /// Process one attempt of `task`
    ///
    /// `task.retries` holds the number of attempts that already failed.
    fn process(&mut self, task: &Task) -> Result<Value, ProcessError>;
}

impl<F> TaskProcessor for F
where
    F: FnMut(&Task) -> Result<Value, ProcessError> + Send,
{
    fn process(&mut self, task: &Task) -> Result<Value, ProcessError> {
        self(task)
    }
}
