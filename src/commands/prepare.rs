//! `fantabasket prepare` — run the data preparation pipeline.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::LocalFs as _;
use crate::application::services::prepare as service;
use crate::infra::fs::LocalFs;

/// Run `fantabasket prepare`.
///
/// # Errors
///
/// Returns an error if the environment is missing or the pipeline fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    if !LocalFs.exists(&config.env_python()) {
        anyhow::bail!(
            "Environment not found at {}. Run 'fantabasket install' first.",
            config.environment.dir.display()
        );
    }

    let reporter = app.terminal_reporter();
    service::run_preparation(&app.runner, &reporter, &config).await?;
    Ok(ExitCode::SUCCESS)
}
