//! Application service — data preparation use-case.
//!
//! Runs the external scraping/stats pipeline as a blocking subprocess using
//! the environment's interpreter, so the dashboard has fresh data to read.
//! The step only runs when the operator asked for it — the caller decides,
//! never this service.

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::config::LauncherConfig;
use crate::domain::error::LaunchError;

/// Run the data preparation entrypoint to completion.
///
/// # Errors
///
/// Returns [`LaunchError::PrepareFailed`] with the entrypoint's exit code if
/// it exits non-zero. Whether that aborts the surrounding workflow is the
/// caller's documented choice (`--allow-stale`).
pub async fn run_preparation(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    config: &LauncherConfig,
) -> Result<()> {
    let python = config.env_python().display().to_string();
    let entrypoint = config.prepare.entrypoint.display().to_string();

    reporter.step(&format!("running data preparation ({entrypoint})..."));
    let status = runner
        .run_status(&python, &[entrypoint.as_str()])
        .await
        .context("running data preparation")?;
    if !status.success() {
        return Err(LaunchError::PrepareFailed(status.code().unwrap_or(-1)).into());
    }
    reporter.success("data preparation complete");
    Ok(())
}
