//! In-memory snapshot store

use std::collections::HashMap;
use std::sync::RwLock;

use super::traits::{AgentSnapshot, SnapshotStore};
use crate::error::StoreError;

/// Keeps snapshots in a map; contents are lost with the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: RwLock<HashMap<String, AgentSnapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of agents with a saved snapshot
    pub fn count(&self) -> usize {
        self.snapshots
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&self, snapshot: &AgentSnapshot) -> Result<(), StoreError> {
        self.snapshots
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(snapshot.agent_id.clone(), snapshot.clone());
        Ok(())
    }

    fn load(&self, agent_id: &str) -> Result<Option<AgentSnapshot>, StoreError> {
        Ok(self
            .snapshots
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(agent_id)
            .cloned())
    }
}
