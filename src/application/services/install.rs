//! Application service — dependency installation use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::config::LauncherConfig;
use crate::domain::error::InstallError;
use crate::domain::requirements::parse_requirements;

/// Bootstrapping the package manager is one small wheel from the index.
pub const BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(300);

/// Result of a successful installation.
#[derive(Debug, Clone, Copy)]
pub struct InstallReport {
    /// Number of requirements declared (not counting transitive packages).
    pub requirement_count: usize,
}

/// Install the declared dependencies into the provisioned environment.
///
/// Two steps, both fatal on failure: bootstrap the package manager with the
/// environment's own pip, then let the package manager resolve and install
/// the requirements. The index URL is always passed explicitly so a
/// locally-configured mirror can never shadow the public index.
///
/// # Errors
///
/// Returns an error if the requirements file is missing or malformed, or if
/// either install step exits non-zero. No partial launch may follow.
pub async fn install_dependencies(
    runner: &impl CommandRunner,
    local_fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    config: &LauncherConfig,
) -> Result<InstallReport> {
    let requirements = &config.install.requirements;
    if !local_fs.exists(requirements) {
        return Err(InstallError::RequirementsMissing(requirements.display().to_string()).into());
    }
    let declared = parse_requirements(&local_fs.read_to_string(requirements)?)?;

    let python = config.env_python().display().to_string();
    let manager = &config.install.package_manager;

    reporter.step(&format!("bootstrapping {manager}..."));
    let output = runner
        .run_with_timeout(
            &python,
            &["-m", "pip", "install", "--quiet", manager.as_str()],
            BOOTSTRAP_TIMEOUT,
        )
        .await
        .with_context(|| format!("bootstrapping {manager}"))?;
    if !output.status.success() {
        return Err(InstallError::BootstrapFailed {
            tool: manager.clone(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
        .into());
    }

    let requirements_arg = requirements.display().to_string();
    reporter.step(&format!(
        "installing {} requirements from {}...",
        declared.len(),
        config.install.index_url
    ));
    // Inherited stdio: resolver progress belongs to the operator, and a
    // large install has no sensible timeout.
    let status = runner
        .run_status(
            &python,
            &[
                "-m",
                manager.as_str(),
                "pip",
                "install",
                "-r",
                requirements_arg.as_str(),
                "--index-url",
                config.install.index_url.as_str(),
            ],
        )
        .await
        .context("installing requirements")?;
    if !status.success() {
        return Err(InstallError::InstallFailed(format!(
            "{manager} pip install exited with {status}"
        ))
        .into());
    }

    reporter.success(&format!("{} requirements installed", declared.len()));
    Ok(InstallReport {
        requirement_count: declared.len(),
    })
}
