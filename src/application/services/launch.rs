//! Application service — the full run workflow.
//!
//! Provision → install → (prepare, on request) → reclaim → serve. Strictly
//! sequential: every stage is an awaited subprocess, and no stage starts
//! before its predecessor has exited. The browser-open is the one
//! best-effort action and is structurally separated from the blocking
//! serve call — its result is ignored beyond a warning.

use std::process::ExitStatus;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::application::ports::{
    BrowserOpener, CommandRunner, LocalFs, PortInspector, ProgressReporter, StateStore,
};
use crate::application::services::{install, prepare, provision, reclaim};
use crate::domain::config::LauncherConfig;
use crate::domain::launch::LaunchState;

/// Operator choices for a single `run` invocation.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Run the data preparation entrypoint before serving.
    pub prepare: bool,
    /// Launch on stale data when preparation fails.
    pub allow_stale: bool,
    /// Open the dashboard URL in the default browser.
    pub open_browser: bool,
    /// Permit port-wide termination as a reclaim fallback.
    pub by_port: bool,
}

/// Run the complete launch workflow and return the server's exit status,
/// which becomes the workflow's own exit code.
///
/// # Errors
///
/// Returns an error when any fatal stage fails: missing/old interpreter,
/// environment creation, bootstrap or install, data preparation (without
/// `allow_stale`), or a port that scoped reclaim could not free.
#[allow(clippy::too_many_arguments)] // one port per side effect; grouping them would hide the seams
pub async fn run_workflow(
    runner: &impl CommandRunner,
    local_fs: &impl LocalFs,
    ports: &impl PortInspector,
    state_store: &impl StateStore,
    browser: &impl BrowserOpener,
    reporter: &impl ProgressReporter,
    config: &LauncherConfig,
    opts: RunOptions,
) -> Result<ExitStatus> {
    provision::ensure_environment(runner, local_fs, reporter, config).await?;
    install::install_dependencies(runner, local_fs, reporter, config).await?;

    if opts.prepare {
        match prepare::run_preparation(runner, reporter, config).await {
            Ok(()) => {}
            Err(e) if opts.allow_stale => {
                reporter.warn(&format!("data preparation failed ({e}); launching on stale data"));
            }
            Err(e) => return Err(e),
        }
    }

    reclaim::reclaim_port(ports, state_store, reporter, config.dashboard.port, opts.by_port)
        .await?;
    reclaim::ensure_port_free(ports, config.dashboard.port).await?;

    serve_dashboard(runner, state_store, browser, reporter, config, opts.open_browser).await
}

/// Open the browser (best-effort) and serve the dashboard in the foreground.
///
/// The spawned server's PID is recorded before waiting so a later reclaim
/// can terminate exactly this process. The record is dropped again after a
/// clean exit.
///
/// # Errors
///
/// Returns an error if the server cannot be spawned or waited on. The
/// server exiting non-zero is not an error here — the status is returned
/// for the caller to surface as the workflow's exit code.
pub async fn serve_dashboard(
    runner: &impl CommandRunner,
    state_store: &impl StateStore,
    browser: &impl BrowserOpener,
    reporter: &impl ProgressReporter,
    config: &LauncherConfig,
    open_browser: bool,
) -> Result<ExitStatus> {
    let url = config.dashboard_url();

    if open_browser {
        // Best-effort task, result ignored. Headless hosts land here.
        if browser.open(&url).await.is_err() {
            reporter.warn(&format!("could not open a browser; visit {url} manually"));
        }
    }

    let python = config.env_python().display().to_string();
    let entrypoint = config.dashboard.entrypoint.display().to_string();

    reporter.step(&format!("serving dashboard at {url} (interrupt to stop)"));
    let mut child = runner
        .spawn_foreground(&python, &[entrypoint.as_str()])
        .context("starting dashboard server")?;

    if let Some(pid) = child.id() {
        state_store.save(&LaunchState::new(
            pid,
            config.dashboard.port,
            config.dashboard.entrypoint.clone(),
            Utc::now(),
        ))?;
    }

    let status = child.wait().await.context("waiting for dashboard server")?;
    state_store.clear()?;
    Ok(status)
}
