use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tasker_core::AgentConfig;

/// Configuration as stored in TOML files (with optional fields for merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawTaskerConfig {
    #[serde(default)]
    pub agent: RawAgentConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Agent config as stored in TOML (optional fields for proper merging)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawAgentConfig {
    pub agent_id: Option<String>,
    pub agent_type: Option<String>,
    pub max_tasks: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub enable_persistence: Option<bool>,
    pub log_level: Option<String>,
    pub max_retries: Option<u32>,
}

/// Final configuration with defaults applied
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskerConfig {
    #[serde(default)]
    pub agent: AgentConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory for agent snapshots (defaults to the XDG data dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_dir: Option<PathBuf>,
}

impl TaskerConfig {
    /// Snapshot directory, falling back to `$XDG_DATA_HOME/tasker/agents`
    pub fn snapshot_dir(&self) -> PathBuf {
        self.storage
            .snapshot_dir
            .clone()
            .unwrap_or_else(tasker_paths::snapshots_dir)
    }
}
