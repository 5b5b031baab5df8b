use anyhow::{Result, anyhow};
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use tasker_core::{AgentSnapshot, JsonFileStore, SnapshotStore, Task, TaskStatus};

use crate::config::TaskerConfig;

#[derive(Args)]
pub struct StatusArgs {
    /// Show the tasks of one agent instead of listing agents
    #[arg(long)]
    pub agent_id: Option<String>,

    /// Only show tasks with this status (pending, running, completed, failed, cancelled)
    #[arg(long, value_parser = parse_status, requires = "agent_id")]
    pub status: Option<TaskStatus>,

    /// Print the raw snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

fn parse_status(raw: &str) -> Result<TaskStatus, String> {
    TaskStatus::parse(&raw.to_ascii_lowercase())
        .ok_or_else(|| format!("unknown task status '{raw}'"))
}

pub fn run(args: StatusArgs, config: &TaskerConfig) -> Result<()> {
    let store = JsonFileStore::new(config.snapshot_dir());

    match args.agent_id {
        Some(agent_id) => show_agent(&store, &agent_id, args.status, args.json),
        None => list_agents(&store, args.json),
    }
}

fn list_agents(store: &JsonFileStore, json: bool) -> Result<()> {
    let mut snapshots = Vec::new();
    for agent_id in store.list_agents()? {
        match store.load(&agent_id) {
            Ok(Some(snapshot)) => snapshots.push(snapshot),
            Ok(None) => {}
            Err(e) => tracing::warn!(agent_id, error = %e, "Skipping unreadable snapshot"),
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
        return Ok(());
    }

    if snapshots.is_empty() {
        println!("No persisted agents in {}", store.dir().display());
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Agent").fg(Color::Cyan),
        Cell::new("Type").fg(Color::Cyan),
        Cell::new("Pending").fg(Color::Cyan),
        Cell::new("Finished").fg(Color::Cyan),
        Cell::new("Saved").fg(Color::Cyan),
    ]);

    for snapshot in &snapshots {
        table.add_row(vec![
            Cell::new(&snapshot.agent_id),
            Cell::new(&snapshot.agent_type),
            Cell::new(snapshot.queue.len()),
            Cell::new(snapshot.completed.len()),
            Cell::new(snapshot.saved_at.format("%Y-%m-%d %H:%M:%S")),
        ]);
    }

    println!("{table}");
    Ok(())
}

fn show_agent(
    store: &JsonFileStore,
    agent_id: &str,
    status: Option<TaskStatus>,
    json: bool,
) -> Result<()> {
    let mut snapshot = store
        .load(agent_id)?
        .ok_or_else(|| anyhow!("No snapshot for agent '{agent_id}'"))?;
    if let Some(status) = status {
        snapshot.queue.retain(|t| t.status == status);
        snapshot.completed.retain(|t| t.status == status);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!(
        "Agent {} ({}), saved {}",
        snapshot.agent_id,
        snapshot.agent_type,
        snapshot.saved_at.to_rfc3339()
    );
    println!("{}", task_table(&snapshot));
    Ok(())
}

/// Pending tasks first in queue order, then finished tasks
fn task_table(snapshot: &AgentSnapshot) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Task").fg(Color::Cyan),
        Cell::new("Type").fg(Color::Cyan),
        Cell::new("Status").fg(Color::Cyan),
        Cell::new("Attempts").fg(Color::Cyan),
        Cell::new("Error").fg(Color::Cyan),
    ]);

    for task in snapshot.queue.iter().chain(&snapshot.completed) {
        table.add_row(task_row(task));
    }
    table
}

fn task_row(task: &Task) -> Vec<Cell> {
    let status = Cell::new(task.status).fg(status_color(task.status));
    vec![
        Cell::new(task.task_id),
        Cell::new(&task.task_type),
        status,
        Cell::new(format!("{}/{}", task.retries, task.max_retries)),
        Cell::new(task.error.as_deref().unwrap_or("-")),
    ]
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending | TaskStatus::Running => Color::Yellow,
        TaskStatus::Completed => Color::Green,
        TaskStatus::Failed => Color::Red,
        TaskStatus::Cancelled => Color::DarkGrey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Arc;
    use tasker_core::{Agent, AgentConfig, Payload};
    use tempfile::tempdir;

    #[test]
    fn task_table_lists_pending_then_finished() {
        let mut done = Task::new("done", Payload::new(), 3);
        done.status = TaskStatus::Completed;
        let snapshot = AgentSnapshot {
            agent_id: "a".to_string(),
            agent_type: "base".to_string(),
            saved_at: Utc::now(),
            queue: vec![Task::new("waiting", Payload::new(), 3)],
            completed: vec![done],
        };

        let rendered = task_table(&snapshot).to_string();

        let waiting = rendered.find("waiting").unwrap();
        let finished = rendered.find("done").unwrap();
        assert!(waiting < finished);
        assert!(rendered.contains("pending"));
        assert!(rendered.contains("completed"));
    }

    #[test]
    fn show_agent_reads_snapshot_written_by_agent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let mut agent = Agent::builder(AgentConfig::default().with_agent_id("cli-agent"))
            .with_store(Arc::new(store.clone()))
            .build();
        agent.queue_task("greet", Payload::new()).unwrap();
        agent.run();

        assert!(show_agent(&store, "cli-agent", None, false).is_ok());
        assert!(show_agent(&store, "cli-agent", Some(TaskStatus::Failed), true).is_ok());
        assert!(list_agents(&store, true).is_ok());
    }

    #[test]
    fn status_filter_parses_wire_names() {
        assert_eq!(parse_status("failed"), Ok(TaskStatus::Failed));
        assert_eq!(parse_status("Cancelled"), Ok(TaskStatus::Cancelled));
        assert!(parse_status("done").unwrap_err().contains("'done'"));
    }

    #[test]
    fn show_agent_reports_missing_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let err = show_agent(&store, "ghost", None, false).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }
}
