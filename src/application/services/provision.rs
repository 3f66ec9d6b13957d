//! Application service — environment provisioning use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::config::LauncherConfig;
use crate::domain::error::EnvironmentError;

/// Environment creation can pull a full interpreter copy on some hosts.
pub const VENV_TIMEOUT: Duration = Duration::from_secs(120);

/// Outcome of the `ensure_environment` use-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// A fresh environment was created.
    Created,
    /// A valid environment already existed and was left untouched.
    AlreadyPresent,
}

/// Ensure the isolated environment exists, creating it if needed.
///
/// Idempotent: a pre-existing valid environment (its own interpreter is
/// present) is never re-created. Bytecode caches are purged on every call,
/// independent of environment state, so stale compiled artifacts cannot
/// mask source changes.
///
/// # Errors
///
/// Returns an error if the host interpreter is missing or too old, or if
/// environment creation fails. Either failure must stop the workflow
/// before installation.
pub async fn ensure_environment(
    runner: &impl CommandRunner,
    local_fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    config: &LauncherConfig,
) -> Result<ProvisionOutcome> {
    check_interpreter(runner, config).await?;

    let purged = purge_bytecode_caches(local_fs, Path::new("."))?;
    if purged > 0 {
        reporter.step(&format!("purged {purged} bytecode cache directories"));
    }

    if local_fs.exists(&config.env_python()) {
        return Ok(ProvisionOutcome::AlreadyPresent);
    }

    let env_dir = config.environment.dir.display().to_string();
    reporter.step(&format!("creating environment at {env_dir}..."));
    let output = runner
        .run_with_timeout(
            &config.environment.interpreter,
            &["-m", "venv", env_dir.as_str()],
            VENV_TIMEOUT,
        )
        .await
        .context("creating environment")?;
    if !output.status.success() {
        return Err(EnvironmentError::CreationFailed(
            String::from_utf8_lossy(&output.stderr).into_owned(),
        )
        .into());
    }
    reporter.success("environment created");
    Ok(ProvisionOutcome::Created)
}

/// Verify the configured interpreter exists and meets the version floor.
///
/// # Errors
///
/// Returns [`EnvironmentError::InterpreterMissing`] when the interpreter is
/// not on PATH, [`EnvironmentError::InterpreterTooOld`] when it is below
/// `environment.min_python`.
pub async fn check_interpreter(
    runner: &impl CommandRunner,
    config: &LauncherConfig,
) -> Result<semver::Version> {
    let interpreter = &config.environment.interpreter;
    let version = query_interpreter_version(runner, interpreter)
        .await?
        .ok_or_else(|| EnvironmentError::InterpreterMissing(interpreter.clone()))?;

    let minimum = semver::Version::parse(&config.environment.min_python)
        .with_context(|| format!("parsing environment.min_python {}", config.environment.min_python))?;
    if version < minimum {
        return Err(EnvironmentError::InterpreterTooOld {
            interpreter: interpreter.clone(),
            found: version.to_string(),
            required: minimum.to_string(),
        }
        .into());
    }
    Ok(version)
}

/// Ask an interpreter for its version. Returns `None` when the interpreter
/// cannot be executed at all (not on PATH).
///
/// # Errors
///
/// Returns [`EnvironmentError::UnparsableVersion`] when the interpreter runs
/// but reports something unintelligible.
pub async fn query_interpreter_version(
    runner: &impl CommandRunner,
    interpreter: &str,
) -> Result<Option<semver::Version>> {
    let Ok(output) = runner.run(interpreter, &["--version"]).await else {
        return Ok(None);
    };
    if !output.status.success() {
        return Ok(None);
    }
    // Pythons up to 3.3 printed the version to stderr
    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = if stdout.trim().is_empty() {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        stdout.into_owned()
    };
    let version = parse_python_version(&text)
        .ok_or_else(|| EnvironmentError::UnparsableVersion(text.trim().to_string()))?;
    Ok(Some(version))
}

/// Parse `"Python 3.13.2"` (and local-build suffixes like `"3.13.0+"`)
/// into a semver version.
#[must_use]
pub fn parse_python_version(text: &str) -> Option<semver::Version> {
    let token = text.split_whitespace().nth(1)?;
    let cleaned = token.trim_end_matches('+');
    semver::Version::parse(cleaned).ok()
}

/// Delete every `__pycache__` directory under `root`. Returns the count.
///
/// # Errors
///
/// Returns an error if the tree walk or a removal fails.
pub fn purge_bytecode_caches(local_fs: &impl LocalFs, root: &Path) -> Result<usize> {
    let caches = local_fs.find_dirs_named(root, "__pycache__")?;
    for dir in &caches {
        local_fs
            .remove_dir_all(dir)
            .with_context(|| format!("purging {}", dir.display()))?;
    }
    Ok(caches.len())
}
