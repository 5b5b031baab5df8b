use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

use config::ConfigLoader;

#[derive(Parser)]
#[command(name = "tasker", about = "Run and inspect single-agent task queues")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Queue two example tasks and run them to completion
    Demo(commands::demo::DemoArgs),
    /// Queue tasks from the command line and run the agent
    Run(commands::run::RunArgs),
    /// Inspect persisted agents
    Status(commands::status::StatusArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigLoader::load()?;

    // --verbose wins, then RUST_LOG, then the configured agent log level
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.agent.log_filter()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Demo(args) => commands::demo::run(args, config).await,
        Commands::Run(args) => commands::run::run(args, config).await,
        Commands::Status(args) => commands::status::run(args, &config),
        Commands::Config(args) => commands::config::run(args, &config),
    }
}
