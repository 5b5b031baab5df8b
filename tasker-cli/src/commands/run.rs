use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use serde_json::Value;
use tasker_core::{Agent, CompletionProcessor, JsonFileStore, Payload, ProcessError, Task};

use super::{print_json, run_until_interrupted};
use crate::config::TaskerConfig;

#[derive(Args)]
pub struct RunArgs {
    /// Task to queue, as TYPE or TYPE={"json":"object"} (repeatable)
    #[arg(short, long = "task", value_name = "TYPE[=JSON]", value_parser = parse_task_spec)]
    pub tasks: Vec<TaskSpec>,

    /// Make every attempt of tasks with this type fail (repeatable)
    #[arg(long, value_name = "TYPE")]
    pub fail_type: Vec<String>,

    /// Agent id (keys the persisted snapshot)
    #[arg(long)]
    pub agent_id: Option<String>,

    /// Queue capacity
    #[arg(long)]
    pub max_tasks: Option<usize>,

    /// Attempts per task
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Do not load or save a snapshot
    #[arg(long)]
    pub no_persist: bool,
}

/// A task given on the command line
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSpec {
    pub task_type: String,
    pub payload: Payload,
}

/// Parse `TYPE` or `TYPE=JSON`, where JSON must be an object
pub fn parse_task_spec(raw: &str) -> Result<TaskSpec, String> {
    let (task_type, payload) = match raw.split_once('=') {
        Some((task_type, json)) => {
            let payload = match serde_json::from_str::<Value>(json) {
                Ok(Value::Object(map)) => map,
                Ok(other) => return Err(format!("payload must be a JSON object, got {other}")),
                Err(e) => return Err(format!("invalid payload JSON: {e}")),
            };
            (task_type.trim(), payload)
        }
        None => (raw.trim(), Payload::new()),
    };

    if task_type.is_empty() {
        return Err("task type must not be empty".to_string());
    }

    Ok(TaskSpec {
        task_type: task_type.to_string(),
        payload,
    })
}

pub async fn run(args: RunArgs, config: TaskerConfig) -> Result<()> {
    if args.tasks.is_empty() {
        bail!("Nothing to run: pass at least one --task");
    }

    let mut agent_config = config.agent.clone();
    if let Some(agent_id) = args.agent_id {
        agent_config.agent_id = Some(agent_id);
    }
    if let Some(max_tasks) = args.max_tasks {
        agent_config.max_tasks = max_tasks;
    }
    if let Some(max_retries) = args.max_retries {
        agent_config.max_retries = max_retries;
    }
    if args.no_persist {
        agent_config.enable_persistence = false;
    }

    let fail_types: HashSet<String> = args.fail_type.into_iter().collect();
    let store = JsonFileStore::new(config.snapshot_dir());
    tracing::debug!(dir = %store.dir().display(), "Using snapshot directory");

    let mut agent = Agent::builder(agent_config)
        .with_processor(move |task: &Task| -> Result<Value, ProcessError> {
            echo_or_fail(&fail_types, task)
        })
        .with_store(Arc::new(store))
        .build();

    let mut queued = Vec::with_capacity(args.tasks.len());
    for spec in args.tasks {
        queued.push(agent.queue_task(spec.task_type, spec.payload)?);
    }

    let agent = run_until_interrupted(agent).await?;

    print_json("Agent status", &agent.status())?;
    let tasks: Vec<&Task> = queued
        .iter()
        .filter_map(|id| agent.task_status(id))
        .collect();
    print_json("Tasks", &tasks)?;
    Ok(())
}

/// Completion marker plus the payload echoed back, unless the type is set to fail
fn echo_or_fail(fail_types: &HashSet<String>, task: &Task) -> Result<Value, ProcessError> {
    if fail_types.contains(&task.task_type) {
        return Err(ProcessError::failed(format!(
            "task type '{}' is configured to fail",
            task.task_type
        )));
    }

    let mut result = CompletionProcessor::marker();
    result["echo"] = Value::Object(task.payload.clone());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_bare_type() {
        let spec = parse_task_spec("greet").unwrap();

        assert_eq!(spec.task_type, "greet");
        assert!(spec.payload.is_empty());
    }

    #[test]
    fn parses_type_with_object_payload() {
        let spec = parse_task_spec(r#"greet={"msg":"hi","n":2}"#).unwrap();

        assert_eq!(spec.task_type, "greet");
        assert_eq!(spec.payload["msg"], "hi");
        assert_eq!(spec.payload["n"], 2);
    }

    #[test]
    fn payload_may_contain_equals_signs() {
        let spec = parse_task_spec(r#"eq={"expr":"a=b"}"#).unwrap();

        assert_eq!(spec.payload["expr"], "a=b");
    }

    #[test]
    fn rejects_non_object_payload() {
        let err = parse_task_spec("greet=[1,2]").unwrap_err();
        assert!(err.contains("JSON object"));
    }

    #[test]
    fn rejects_invalid_json_and_empty_type() {
        assert!(parse_task_spec("greet={").unwrap_err().contains("invalid payload"));
        assert!(parse_task_spec(r#"={"a":1}"#).is_err());
        assert!(parse_task_spec("").is_err());
    }

    #[test]
    fn echo_processor_returns_marker_and_payload() {
        let fail_types = HashSet::new();
        let spec = parse_task_spec(r#"greet={"msg":"hi"}"#).unwrap();
        let task = Task::new(spec.task_type, spec.payload, 3);

        let value = echo_or_fail(&fail_types, &task).unwrap();

        assert_eq!(value["status"], "completed");
        assert_eq!(value["echo"], json!({"msg": "hi"}));
    }

    #[test]
    fn fail_type_makes_processing_fail() {
        let fail_types: HashSet<String> = ["boom".to_string()].into();
        let task = Task::new("boom", Payload::new(), 3);

        let err = echo_or_fail(&fail_types, &task).unwrap_err();

        assert_eq!(err.to_string(), "task type 'boom' is configured to fail");
    }
}
