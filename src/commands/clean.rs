//! `fantabasket clean` — purge bytecode caches, optionally the environment.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::clean as service;
use crate::infra::fs::LocalFs;

/// Arguments for the clean command.
#[derive(Args, Default)]
pub struct CleanArgs {
    /// Also remove the environment and the recorded launch state
    #[arg(long)]
    pub all: bool,
}

/// Run `fantabasket clean`.
///
/// # Errors
///
/// Returns an error if a removal fails or the confirmation prompt fails.
pub async fn run(args: &CleanArgs, app: &AppContext) -> Result<ExitCode> {
    // --yes / CI skips the prompt and proceeds
    if args.all && !app.non_interactive {
        let confirmed = app.confirm(
            "Remove the environment and recorded launch state?",
            false,
        )?;
        if !confirmed {
            app.output.info("Nothing removed.");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let config = app.load_config()?;
    let reporter = app.terminal_reporter();
    let report = service::clean(&LocalFs, &app.state_mgr, &reporter, &config, args.all)?;

    if report.environment_removed {
        app.output.success(&format!(
            "Removed environment {} and {} cache directories.",
            config.environment.dir.display(),
            report.caches_removed
        ));
        app.output.kv("Reinstall", "fantabasket install");
    } else {
        app.output.success(&format!(
            "Removed {} cache directories.",
            report.caches_removed
        ));
    }
    Ok(ExitCode::SUCCESS)
}
