//! Agent system for tasker
//!
//! This module provides the single-agent task pipeline:
//! - Task records with a status lifecycle and retry counter
//! - Agent configuration
//! - The agent state machine and its run loop

pub mod config;
pub mod interrupt;
pub mod task;
pub mod types;
pub mod worker;

pub use config::{AgentConfig, DEFAULT_MAX_TASKS, DEFAULT_TIMEOUT_SECONDS};
pub use interrupt::InterruptHandle;
pub use task::{DEFAULT_MAX_RETRIES, Payload, Task, TaskId, TaskStatus};
pub use types::{AgentState, AgentStatusReport, RunOutcome};
pub use worker::{Agent, AgentBuilder};
