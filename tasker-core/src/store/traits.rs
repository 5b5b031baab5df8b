//! SnapshotStore trait and snapshot type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::Task;
use crate::error::StoreError;

/// Serialized state of one agent: its pending queue and finished tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: String,
    pub agent_type: String,
    pub saved_at: DateTime<Utc>,
    /// Pending tasks, head of the queue first
    pub queue: Vec<Task>,
    /// Finished tasks, oldest first
    pub completed: Vec<Task>,
}

/// Durable storage for agent snapshots
///
/// Implementations must be safe to share; the agent holds an
/// `Arc<dyn SnapshotStore>`.
pub trait SnapshotStore: Send + Sync {
    /// Persist the snapshot, replacing any earlier one for the same agent
    fn save(&self, snapshot: &AgentSnapshot) -> Result<(), StoreError>;

    /// Load the latest snapshot for an agent, `None` if nothing was saved
    fn load(&self, agent_id: &str) -> Result<Option<AgentSnapshot>, StoreError>;
}
