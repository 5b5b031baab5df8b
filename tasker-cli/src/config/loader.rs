use super::types::{RawAgentConfig, RawTaskerConfig, StorageConfig, TaskerConfig};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tasker_core::AgentConfig;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<TaskerConfig> {
        Self::load_from(Self::user_config_path().as_deref(), &Self::project_config_path())
    }

    /// Load and merge the given files; missing files are skipped
    pub fn load_from(user_path: Option<&Path>, project_path: &Path) -> Result<TaskerConfig> {
        let mut raw = RawTaskerConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user_path
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(user_path)?);
        }

        // Layer 2: Project config
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    fn read_raw(path: &Path) -> Result<RawTaskerConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Get user config path (`$XDG_CONFIG_HOME/tasker/config.toml`)
    pub fn user_config_path() -> Option<PathBuf> {
        Some(tasker_paths::config_dir().join("config.toml"))
    }

    /// Get project config path
    /// Can be overridden with TASKER_PROJECT_CONFIG_DIR env var
    pub fn project_config_path() -> PathBuf {
        if let Ok(dir) = std::env::var("TASKER_PROJECT_CONFIG_DIR") {
            PathBuf::from(dir).join("config.toml")
        } else {
            PathBuf::from(".tasker/config.toml")
        }
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawTaskerConfig, overlay: RawTaskerConfig) -> RawTaskerConfig {
        RawTaskerConfig {
            agent: RawAgentConfig {
                agent_id: overlay.agent.agent_id.or(base.agent.agent_id),
                agent_type: overlay.agent.agent_type.or(base.agent.agent_type),
                max_tasks: overlay.agent.max_tasks.or(base.agent.max_tasks),
                timeout_seconds: overlay.agent.timeout_seconds.or(base.agent.timeout_seconds),
                enable_persistence: overlay
                    .agent
                    .enable_persistence
                    .or(base.agent.enable_persistence),
                log_level: overlay.agent.log_level.or(base.agent.log_level),
                max_retries: overlay.agent.max_retries.or(base.agent.max_retries),
            },
            storage: StorageConfig {
                snapshot_dir: overlay.storage.snapshot_dir.or(base.storage.snapshot_dir),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawTaskerConfig) -> TaskerConfig {
        let defaults = AgentConfig::default();
        TaskerConfig {
            agent: AgentConfig {
                agent_id: raw.agent.agent_id,
                agent_type: raw.agent.agent_type.unwrap_or(defaults.agent_type),
                max_tasks: raw.agent.max_tasks.unwrap_or(defaults.max_tasks),
                timeout_seconds: raw.agent.timeout_seconds.unwrap_or(defaults.timeout_seconds),
                enable_persistence: raw
                    .agent
                    .enable_persistence
                    .unwrap_or(defaults.enable_persistence),
                log_level: raw.agent.log_level.unwrap_or(defaults.log_level),
                max_retries: raw.agent.max_retries.unwrap_or(defaults.max_retries),
            },
            storage: raw.storage,
        }
    }
}
