//! `fantabasket stop` — stop the dashboard and free its port.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::reclaim::{self as service, ReclaimOutcome};

/// Arguments for the stop command.
#[derive(Args, Default)]
pub struct StopArgs {
    /// Also terminate unrecorded listeners on the dashboard port
    #[arg(long)]
    pub by_port: bool,
}

/// Run `fantabasket stop`.
///
/// Finding nothing to stop is a success: the contract is "the port is
/// free afterwards", not "something was killed".
///
/// # Errors
///
/// Returns an error if the state file is corrupt or termination cannot
/// be executed.
pub async fn run(args: &StopArgs, app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let reporter = app.terminal_reporter();

    let outcome = service::reclaim_port(
        &app.ports,
        &app.state_mgr,
        &reporter,
        config.dashboard.port,
        args.by_port,
    )
    .await?;

    match outcome {
        ReclaimOutcome::NothingHeld => {
            app.output.info("No dashboard to stop.");
            app.output.kv("Launch", "fantabasket run");
        }
        ReclaimOutcome::TerminatedRecorded { pid } => {
            app.output.success(&format!("Dashboard stopped (pid {pid})."));
        }
        ReclaimOutcome::TerminatedListeners { pids } => {
            let listed: Vec<String> = pids.iter().map(ToString::to_string).collect();
            app.output.success(&format!(
                "Freed port {} (terminated pid {}).",
                config.dashboard.port,
                listed.join(", ")
            ));
        }
    }

    Ok(ExitCode::SUCCESS)
}
