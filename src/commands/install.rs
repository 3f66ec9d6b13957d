//! `fantabasket install` — provision the environment and install dependencies.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::provision::ProvisionOutcome;
use crate::application::services::{install as install_service, provision};
use crate::infra::fs::LocalFs;

/// Run `fantabasket install`.
///
/// # Errors
///
/// Returns an error if provisioning or installation fails.
pub async fn run(app: &AppContext) -> Result<ExitCode> {
    let config = app.load_config()?;
    let reporter = app.terminal_reporter();

    let outcome = provision::ensure_environment(&app.runner, &LocalFs, &reporter, &config).await?;
    if outcome == ProvisionOutcome::AlreadyPresent {
        app.output.info(&format!(
            "Environment {} already present.",
            config.environment.dir.display()
        ));
    }

    let report =
        install_service::install_dependencies(&app.runner, &LocalFs, &reporter, &config).await?;

    app.output.success(&format!(
        "Environment ready ({} requirements).",
        report.requirement_count
    ));
    app.output.kv("Prepare data", "fantabasket prepare");
    app.output.kv("Launch", "fantabasket run");
    Ok(ExitCode::SUCCESS)
}
