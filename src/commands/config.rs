//! `fantabasket config` — inspect and edit the persisted configuration.

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

use crate::app::AppContext;
use crate::domain::config::{config_value, set_config_value};

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the current value of a setting
    Get {
        /// Setting key, e.g. `dashboard.port`
        key: String,
    },
    /// Change a setting
    Set {
        /// Setting key, e.g. `dashboard.port`
        key: String,
        /// New value
        value: String,
    },
    /// Print the config file location
    Path,
}

/// Run `fantabasket config`.
///
/// # Errors
///
/// Returns an error for unknown keys, invalid values, or unreadable files.
pub fn run(cmd: &ConfigCommand, app: &AppContext) -> Result<ExitCode> {
    match cmd {
        ConfigCommand::Get { key } => {
            let config = app.load_config()?;
            println!("{}", config_value(&config, key)?);
        }
        ConfigCommand::Set { key, value } => {
            let mut config = app.load_config()?;
            set_config_value(&mut config, key, value)?;
            app.config_store.save(&config)?;
            app.output.success(&format!("{key} = {value}"));
        }
        ConfigCommand::Path => {
            println!("{}", app.config_store.path()?.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}
