//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Provision, install and launch the fantabasket dashboard
#[derive(Parser)]
#[command(
    name = "fantabasket",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Answer yes to all prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Provision, install and serve the dashboard
    Run(commands::run::RunArgs),

    /// Provision the environment and install dependencies
    Install,

    /// Run the data preparation pipeline
    Prepare,

    /// Stop the dashboard and free its port
    Stop(commands::stop::StopArgs),

    /// Show environment, dashboard and port status
    Status,

    /// Diagnose issues
    Doctor,

    /// Purge bytecode caches (and, with --all, the environment)
    Clean(commands::clean::CleanArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            command,
        } = self;
        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
        })?;

        match command {
            Command::Run(args) => commands::run::run(&args, &app).await,
            Command::Install => commands::install::run(&app).await,
            Command::Prepare => commands::prepare::run(&app).await,
            Command::Stop(args) => commands::stop::run(&args, &app).await,
            Command::Status => commands::status::run(&app).await,
            Command::Doctor => commands::doctor::run(&app).await,
            Command::Clean(args) => commands::clean::run(&args, &app).await,
            Command::Config(cmd) => commands::config::run(&cmd, &app),
            Command::Version => Ok(commands::version::run(json)),
        }
    }
}
