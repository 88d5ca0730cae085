use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;
use tracing::debug;

mod cli;

use cli::settings::SettingsCommands;
use cli::updates::UpdatesCommands;

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Waypoint CLI - transit settings and agency database updates")]
#[command(version)]
struct Cli {
    /// Database file (defaults to ~/.waypoint/waypoint.db)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and change user settings
    #[command(subcommand)]
    Settings(SettingsCommands),
    /// Check for agency database updates
    #[command(subcommand)]
    Updates(UpdatesCommands),
}

#[tokio::main]
async fn main() {
    waypoint_config::init_tracing();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(cli: Cli) -> anyhow::Result<()> {
    let database = cli
        .database
        .unwrap_or_else(waypoint_config::constants::database_file);
    debug!("Using database at {}", database.display());
    let store = waypoint_cli::open_store(&database).await?;

    match cli.command {
        Commands::Settings(command) => cli::settings::handle_settings_command(command, store).await,
        Commands::Updates(command) => cli::updates::handle_updates_command(command, store).await,
    }
}
