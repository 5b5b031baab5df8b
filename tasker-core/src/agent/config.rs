//! Agent configuration

use serde::{Deserialize, Serialize};

use super::task::DEFAULT_MAX_RETRIES;

/// Default queue bound
pub const DEFAULT_MAX_TASKS: usize = 100;

/// Default timeout, stored and reported only
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 300;

/// Configuration passed to an agent at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Explicit agent id; a UUID is generated when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Free-form agent type tag
    pub agent_type: String,
    /// Maximum number of pending tasks
    pub max_tasks: usize,
    /// Per-agent timeout. Not enforced.
    pub timeout_seconds: u64,
    /// Save snapshots through an attached store
    pub enable_persistence: bool,
    /// Log level name (`DEBUG`, `INFO`, `WARNING`, `ERROR`)
    pub log_level: String,
    /// Attempts each new task gets before it is marked failed
    pub max_retries: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_id: None,
            agent_type: "base".to_string(),
            max_tasks: DEFAULT_MAX_TASKS,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            enable_persistence: true,
            log_level: "INFO".to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl AgentConfig {
    pub fn new(agent_type: impl Into<String>) -> Self {
        Self {
            agent_type: agent_type.into(),
            ..Default::default()
        }
    }

    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    pub fn with_max_tasks(mut self, max_tasks: usize) -> Self {
        self.max_tasks = max_tasks;
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_persistence(mut self, enabled: bool) -> Self {
        self.enable_persistence = enabled;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Translate `log_level` into a `tracing` filter directive
    ///
    /// Accepts the conventional upper-case level names, including the
    /// `WARNING` and `CRITICAL` spellings. Unknown names fall back to `info`.
    pub fn log_filter(&self) -> &'static str {
        match self.log_level.trim().to_ascii_uppercase().as_str() {
            "TRACE" => "trace",
            "DEBUG" => "debug",
            "WARN" | "WARNING" => "warn",
            "ERROR" | "CRITICAL" | "FATAL" => "error",
            _ => "info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AgentConfig::default();
        assert!(config.agent_id.is_none());
        assert_eq!(config.agent_type, "base");
        assert_eq!(config.max_tasks, 100);
        assert_eq!(config.timeout_seconds, 300);
        assert!(config.enable_persistence);
        assert_eq!(config.log_level, "INFO");
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_builder_overrides() {
        let config = AgentConfig::new("example")
            .with_agent_id("agent-7")
            .with_max_tasks(2)
            .with_persistence(false)
            .with_max_retries(5);

        assert_eq!(config.agent_type, "example");
        assert_eq!(config.agent_id.as_deref(), Some("agent-7"));
        assert_eq!(config.max_tasks, 2);
        assert!(!config.enable_persistence);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AgentConfig = serde_json::from_str(r#"{"max_tasks": 5}"#).unwrap();
        assert_eq!(config.max_tasks, 5);
        assert_eq!(config.agent_type, "base");
        assert!(config.enable_persistence);
    }

    #[test]
    fn test_log_filter_mapping() {
        let filter = |level: &str| AgentConfig::default().with_log_level(level).log_filter();

        assert_eq!(filter("INFO"), "info");
        assert_eq!(filter("debug"), "debug");
        assert_eq!(filter("WARNING"), "warn");
        assert_eq!(filter("CRITICAL"), "error");
        assert_eq!(filter("nonsense"), "info");
    }
}
