//! End-to-end tests for the tasker binary
//!
//! Each test points XDG and project config dirs at a temp directory so runs
//! never read or write the real user data.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn tasker(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tasker"))
        .args(args)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("TASKER_PROJECT_CONFIG_DIR", home.join("project"))
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run tasker")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    let output = tasker(home.path(), &["--help"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    for command in ["demo", "run", "status", "config"] {
        assert!(stdout.contains(command), "missing {command} in: {stdout}");
    }
}

#[test]
fn demo_completes_both_example_tasks() {
    let home = TempDir::new().unwrap();
    let output = tasker(home.path(), &["demo"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("\"completed_tasks\": 2"));
    assert!(stdout.contains("\"task_type\": \"example_task\""));
    assert!(stdout.contains("\"message\": \"Hello\""));
    assert!(!home.path().join("data/tasker/agents").exists());
}

#[test]
fn run_persists_snapshot_that_status_reads() {
    let home = TempDir::new().unwrap();
    let output = tasker(
        home.path(),
        &[
            "run",
            "--agent-id",
            "e2e",
            "--task",
            r#"greet={"msg":"hi"}"#,
            "--task",
            "boom",
            "--fail-type",
            "boom",
        ],
    );

    assert!(output.status.success());
    let run_out = stdout(&output);
    assert!(run_out.contains("\"echo\""));
    assert!(run_out.contains("task type 'boom' is configured to fail"));
    assert!(home.path().join("data/tasker/agents/e2e.json").exists());

    let status = tasker(home.path(), &["status", "--agent-id", "e2e"]);
    assert!(status.status.success());
    let table = stdout(&status);
    assert!(table.contains("greet"));
    assert!(table.contains("failed"));

    let failed_only = tasker(home.path(), &["status", "--agent-id", "e2e", "--status", "failed"]);
    assert!(failed_only.status.success());
    let table = stdout(&failed_only);
    assert!(table.contains("boom"));
    assert!(!table.contains("greet"));
}

#[test]
fn run_without_tasks_is_an_error() {
    let home = TempDir::new().unwrap();
    let output = tasker(home.path(), &["run"]);

    assert!(!output.status.success());
}

#[test]
fn config_show_uses_project_overrides() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join("project")).unwrap();
    std::fs::write(
        home.path().join("project/config.toml"),
        "[agent]\nagent_type = \"resizer\"\nmax_tasks = 4\n",
    )
    .unwrap();

    let output = tasker(home.path(), &["config", "show"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("[agent]"));
    assert!(stdout.contains("agent_type = \"resizer\""));
    assert!(stdout.contains("max_tasks = 4"));
}

#[test]
fn config_path_shows_paths() {
    let home = TempDir::new().unwrap();
    let output = tasker(home.path(), &["config", "path"]);

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("User config:"));
    assert!(stdout.contains("Project config:"));
    assert!(stdout.contains("Snapshots:"));
}
