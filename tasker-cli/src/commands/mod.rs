pub mod config;
pub mod demo;
pub mod run;
pub mod status;

use anyhow::{Context, Result};
use tasker_core::Agent;

/// Run the agent loop on a blocking thread; Ctrl-C raises its interrupt
pub(crate) async fn run_until_interrupted(mut agent: Agent) -> Result<Agent> {
    let interrupt = agent.interrupt_handle();
    let mut worker = tokio::task::spawn_blocking(move || {
        let outcome = agent.run();
        (agent, outcome)
    });

    let (agent, outcome) = tokio::select! {
        joined = &mut worker => joined.context("Agent thread panicked")?,
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("Interrupt received, stopping after the current task");
            interrupt.raise();
            worker.await.context("Agent thread panicked")?
        }
    };

    tracing::debug!(?outcome, "Agent run finished");
    Ok(agent)
}

/// Print a serializable value as pretty JSON on stdout
pub(crate) fn print_json<T: serde::Serialize>(label: &str, value: &T) -> Result<()> {
    println!("{label}: {}", serde_json::to_string_pretty(value)?);
    Ok(())
}
