//! Settings CLI commands

use clap::Subcommand;
use colored::*;
use serde_json::Value;
use std::sync::Arc;
use waypoint_settings::SettingsAccessor;
use waypoint_storage::KeyValueStore;

#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Print the full settings document
    Show,
    /// Print one value, e.g. `display.theme`
    Get {
        /// Dot-separated path
        path: String,
    },
    /// Change one value; the value is parsed as JSON when possible
    Set {
        /// Dot-separated path
        path: String,
        /// New value, e.g. `dark`, `3` or `["JAM","WDD"]`
        value: String,
    },
}

pub async fn handle_settings_command(
    command: SettingsCommands,
    store: Arc<dyn KeyValueStore>,
) -> anyhow::Result<()> {
    let settings = SettingsAccessor::new(store);

    match command {
        SettingsCommands::Show => {
            print_json(&settings.get_all().await)?;
        }
        SettingsCommands::Get { path } => match settings.get_value(&path).await {
            Some(value) => print_json(&value)?,
            None => println!("{} {}", path.cyan(), "is not set".yellow()),
        },
        SettingsCommands::Set { path, value } => {
            let value = waypoint_cli::parse_value(&value);
            settings.set_value(&path, value.clone()).await?;
            println!("{} {} = {}", "✓".green(), path.cyan(), value);
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
