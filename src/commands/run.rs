//! `fantabasket run` — the full launch workflow.

use std::process::{ExitCode, ExitStatus};

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::launch::{self as service, RunOptions};
use crate::domain::config::validate_port;
use crate::infra::browser::SystemBrowser;
use crate::infra::fs::LocalFs;

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Run the data preparation pipeline before serving
    #[arg(long)]
    pub prepare: bool,

    /// Launch on stale data if preparation fails
    #[arg(long, requires = "prepare")]
    pub allow_stale: bool,

    /// Do not open the dashboard in a browser
    #[arg(long)]
    pub no_browser: bool,

    /// Also terminate unrecorded listeners on the dashboard port
    #[arg(long)]
    pub by_port: bool,

    /// Override the configured dashboard port
    #[arg(long)]
    pub port: Option<u16>,
}

/// Run `fantabasket run`.
///
/// The returned exit code is the dashboard server's own exit code — the
/// workflow never masks how the final foreground command ended.
///
/// # Errors
///
/// Returns an error if any fatal stage fails before the server starts.
pub async fn run(args: &RunArgs, app: &AppContext) -> Result<ExitCode> {
    let mut config = app.load_config()?;
    if let Some(port) = args.port {
        validate_port(port)?;
        config.dashboard.port = port;
    }

    let reporter = app.terminal_reporter();
    let opts = RunOptions {
        prepare: args.prepare,
        allow_stale: args.allow_stale,
        open_browser: config.dashboard.open_browser && !args.no_browser,
        by_port: args.by_port,
    };

    let status = service::run_workflow(
        &app.runner,
        &LocalFs,
        &app.ports,
        &app.state_mgr,
        &SystemBrowser::default_runner(),
        &reporter,
        &config,
        opts,
    )
    .await?;

    if !status.success() {
        app.output
            .error(&format!("dashboard server exited with {status}"));
    }
    Ok(exit_code_from(status))
}

/// Map a child exit status onto this process's exit code.
///
/// Signal deaths carry no code on unix; they surface as a generic failure.
fn exit_code_from(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(code) => u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from),
        None => ExitCode::FAILURE,
    }
}
