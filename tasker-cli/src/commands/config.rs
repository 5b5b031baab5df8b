use crate::config::{ConfigLoader, TaskerConfig};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (merged)
    Show,
    /// Show configuration and snapshot paths
    Path,
}

pub fn run(args: ConfigArgs, config: &TaskerConfig) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(config),
        ConfigCommands::Path => show_paths(config),
    }
}

fn show_config(config: &TaskerConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{}", toml_str);
    Ok(())
}

fn show_paths(config: &TaskerConfig) -> Result<()> {
    if let Some(user) = ConfigLoader::user_config_path() {
        println!("User config:    {}", user.display());
    }
    println!(
        "Project config: {}",
        ConfigLoader::project_config_path().display()
    );
    println!("Snapshots:      {}", config.snapshot_dir().display());
    Ok(())
}
