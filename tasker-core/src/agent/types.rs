//! Agent type definitions

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Agent lifecycle state
///
/// `Created -> Initialized -> Active -> Idle | Error -> Terminated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    #[default]
    Created,
    Initialized,
    Active,
    Idle,
    Error,
    Terminated,
}

impl AgentState {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Initialized => "initialized",
            Self::Active => "active",
            Self::Idle => "idle",
            Self::Error => "error",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time view of an agent, as returned by `Agent::status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatusReport {
    pub agent_id: String,
    pub agent_type: String,
    pub state: AgentState,
    pub created_at: DateTime<Utc>,
    pub queue_size: usize,
    pub completed_tasks: usize,
    pub uptime_seconds: f64,
}

/// How a call to `Agent::run` ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Initialization failed; the loop never started
    NotStarted,
    /// The queue emptied and the agent went idle
    Drained,
    /// The interrupt handle was raised
    Interrupted,
    /// A loop-level fault stopped processing
    Faulted(String),
}

impl RunOutcome {
    pub fn is_drained(&self) -> bool {
        matches!(self, Self::Drained)
    }
}
