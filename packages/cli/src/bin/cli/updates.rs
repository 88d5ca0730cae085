//! Agency database update CLI commands

use clap::{Args, Subcommand};
use colored::*;
use std::sync::Arc;
use waypoint_storage::KeyValueStore;
use waypoint_updates::{
    ApiClientConfig, DatabaseVersion, HttpApiClient, UpdateChecker, UpdateCheckerConfig,
    UpdateInfo,
};

#[derive(Debug, Subcommand)]
pub enum UpdatesCommands {
    /// Check for a newer agency database (at most once per interval)
    Check(CheckArgs),
    /// Show cached update state without contacting the server
    Status(AgencyArgs),
    /// Forget cached update state for an agency
    Clear {
        /// Agency ID code
        agency: String,
    },
}

#[derive(Debug, Args)]
pub struct AgencyArgs {
    /// Agency ID code
    pub agency: String,
    /// Currently installed database version
    #[arg(long)]
    pub installed: Option<DatabaseVersion>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub agency: AgencyArgs,
    /// Query the server even if the last check was recent
    #[arg(long)]
    pub force: bool,
}

fn online_checker(
    store: Arc<dyn KeyValueStore>,
    args: &AgencyArgs,
) -> anyhow::Result<UpdateChecker> {
    let api = HttpApiClient::new(ApiClientConfig::from_env())?;
    let installed = waypoint_cli::installed_versions(&args.agency, args.installed.clone());

    Ok(UpdateChecker::new(store, Arc::new(api), Arc::new(installed))
        .with_config(UpdateCheckerConfig::from_env()))
}

fn print_update(agency: &str, info: Option<UpdateInfo>) {
    match info {
        Some(UpdateInfo {
            is_available: true,
            version: Some(version),
        }) => println!(
            "⬆️  {} database update available: {}",
            agency.cyan(),
            version.to_string().green().bold()
        ),
        Some(_) => println!(
            "⬆️  {} database update available (latest version unknown)",
            agency.cyan()
        ),
        None => println!("{} {} database is up to date", "✓".green(), agency.cyan()),
    }
}

pub async fn handle_updates_command(
    command: UpdatesCommands,
    store: Arc<dyn KeyValueStore>,
) -> anyhow::Result<()> {
    match command {
        UpdatesCommands::Check(args) => {
            let checker = online_checker(store, &args.agency)?;
            let info = checker.check(&args.agency.agency, args.force).await?;
            print_update(&args.agency.agency, info);
        }
        UpdatesCommands::Status(args) => {
            let checker =
                waypoint_cli::offline_checker(store, &args.agency, args.installed.clone());
            let last_checked = checker.last_checked_at(&args.agency).await;
            let latest = checker.latest_known_version(&args.agency).await;

            println!("{}", args.agency.bold());
            println!(
                "  Last checked:   {}",
                waypoint_cli::format_timestamp(last_checked)
            );
            println!(
                "  Latest known:   {}",
                latest
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "unknown".to_string())
            );
            print_update(&args.agency, checker.is_update_available(&args.agency).await);
        }
        UpdatesCommands::Clear { agency } => {
            let checker = waypoint_cli::offline_checker(store, &agency, None);
            checker.clear_db_version_latest(&agency).await;
            println!("{} Cleared update state for {}", "✓".green(), agency.cyan());
        }
    }

    Ok(())
}
