use anyhow::Result;
use clap::Args;
use serde_json::json;
use tasker_core::{Agent, AgentConfig, Payload};

use super::{print_json, run_until_interrupted};
use crate::config::TaskerConfig;

#[derive(Args)]
pub struct DemoArgs {
    /// Agent type reported in the status output
    #[arg(long, default_value = "example")]
    pub agent_type: String,
}

pub async fn run(args: DemoArgs, config: TaskerConfig) -> Result<()> {
    // The demo never touches the snapshot directory
    let agent_config = AgentConfig {
        agent_type: args.agent_type,
        enable_persistence: false,
        ..config.agent
    };
    let mut agent = Agent::new(agent_config);

    let mut first = None;
    for message in ["Hello", "World"] {
        let id = agent.queue_task("example_task", greeting(message))?;
        first.get_or_insert(id);
    }

    let agent = run_until_interrupted(agent).await?;

    print_json("Agent status", &agent.status())?;
    if let Some(task) = first.and_then(|id| agent.task_status(&id)) {
        print_json("Task status", task)?;
    }
    Ok(())
}

fn greeting(message: &str) -> Payload {
    let mut payload = Payload::new();
    payload.insert("message".to_string(), json!(message));
    payload
}
