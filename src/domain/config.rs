//! Domain types and validators for the launcher configuration.
//!
//! Pure functions only — no I/O, no async, no filesystem access.
//!
//! One explicit structure instead of ambient globals (environment path,
//! port, index URL, interpreter), so every stage and every test can run
//! against isolated paths and ports.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "environment.dir",
    "environment.interpreter",
    "environment.min_python",
    "install.requirements",
    "install.index_url",
    "install.package_manager",
    "prepare.entrypoint",
    "dashboard.entrypoint",
    "dashboard.port",
    "dashboard.open_browser",
];

/// Ports below 1024 require elevated privileges; the dashboard never does.
pub const MIN_PORT: u16 = 1024;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.fantabasket/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LauncherConfig {
    /// Isolated Python environment settings.
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Dependency installation settings.
    #[serde(default)]
    pub install: InstallConfig,
    /// Data preparation settings.
    #[serde(default)]
    pub prepare: PrepareConfig,
    /// Dashboard server settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Isolated environment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Environment directory, relative to the project root.
    #[serde(default = "default_env_dir")]
    pub dir: PathBuf,
    /// Host interpreter used to create the environment.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Minimum interpreter version accepted (semver).
    #[serde(default = "default_min_python")]
    pub min_python: String,
}

/// Dependency installation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Requirements declaration read by the installer.
    #[serde(default = "default_requirements")]
    pub requirements: PathBuf,
    /// Public package index. Passed explicitly on every install so a
    /// locally-configured mirror can never shadow it.
    #[serde(default = "default_index_url")]
    pub index_url: String,
    /// Package manager bootstrapped into the environment.
    #[serde(default = "default_package_manager")]
    pub package_manager: String,
}

/// Data preparation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Entrypoint of the scraping/stats pipeline.
    #[serde(default = "default_prepare_entrypoint")]
    pub entrypoint: PathBuf,
}

/// Dashboard server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Entrypoint of the dashboard server.
    #[serde(default = "default_dashboard_entrypoint")]
    pub entrypoint: PathBuf,
    /// TCP port the dashboard binds to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether `run` opens the dashboard URL in the default browser.
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            dir: default_env_dir(),
            interpreter: default_interpreter(),
            min_python: default_min_python(),
        }
    }
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            requirements: default_requirements(),
            index_url: default_index_url(),
            package_manager: default_package_manager(),
        }
    }
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            entrypoint: default_prepare_entrypoint(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            entrypoint: default_dashboard_entrypoint(),
            port: default_port(),
            open_browser: default_open_browser(),
        }
    }
}

fn default_env_dir() -> PathBuf {
    PathBuf::from(".venv")
}

fn default_interpreter() -> String {
    "python3.13".to_string()
}

fn default_min_python() -> String {
    "3.13.0".to_string()
}

fn default_requirements() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_index_url() -> String {
    "https://pypi.org/simple".to_string()
}

fn default_package_manager() -> String {
    "uv".to_string()
}

fn default_prepare_entrypoint() -> PathBuf {
    PathBuf::from("src/main.py")
}

fn default_dashboard_entrypoint() -> PathBuf {
    PathBuf::from("src/dashboard/dashboard.py")
}

fn default_port() -> u16 {
    8080
}

fn default_open_browser() -> bool {
    true
}

// ── Derived paths ────────────────────────────────────────────────────────────

impl LauncherConfig {
    /// Path of the environment's own interpreter. Its presence is the
    /// validity marker for the environment.
    #[must_use]
    pub fn env_python(&self) -> PathBuf {
        #[cfg(windows)]
        return self.environment.dir.join("Scripts").join("python.exe");
        #[cfg(not(windows))]
        self.environment.dir.join("bin").join("python")
    }

    /// The dashboard URL opened in the browser.
    #[must_use]
    pub fn dashboard_url(&self) -> String {
        format!("http://localhost:{}", self.dashboard.port)
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a dashboard port value.
///
/// # Errors
///
/// Returns an error for privileged (< 1024) ports.
pub fn validate_port(port: u16) -> Result<()> {
    if port < MIN_PORT {
        return Err(ConfigError::InvalidValue {
            key: "dashboard.port".to_string(),
            value: port.to_string(),
            reason: format!("Port must be {MIN_PORT} or higher."),
        }
        .into());
    }
    Ok(())
}

/// Validates a package index URL.
///
/// # Errors
///
/// Returns an error unless the URL uses the `http` or `https` scheme.
pub fn validate_index_url(url: &str) -> Result<()> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(ConfigError::InvalidValue {
            key: "install.index_url".to_string(),
            value: url.to_string(),
            reason: "Index URL must start with http:// or https://.".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Returns the current value for a whitelisted key.
///
/// # Errors
///
/// Returns an error if the key is unknown.
pub fn config_value(config: &LauncherConfig, key: &str) -> Result<String> {
    validate_config_key(key)?;
    Ok(match key {
        "environment.dir" => config.environment.dir.display().to_string(),
        "environment.interpreter" => config.environment.interpreter.clone(),
        "environment.min_python" => config.environment.min_python.clone(),
        "install.requirements" => config.install.requirements.display().to_string(),
        "install.index_url" => config.install.index_url.clone(),
        "install.package_manager" => config.install.package_manager.clone(),
        "prepare.entrypoint" => config.prepare.entrypoint.display().to_string(),
        "dashboard.entrypoint" => config.dashboard.entrypoint.display().to_string(),
        "dashboard.port" => config.dashboard.port.to_string(),
        "dashboard.open_browser" => config.dashboard.open_browser.to_string(),
        _ => unreachable!("key validated against whitelist"),
    })
}

/// Validates and applies a value for a whitelisted key.
///
/// # Errors
///
/// Returns an error if the key is unknown or the value fails validation.
pub fn set_config_value(config: &mut LauncherConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    match key {
        "environment.dir" => config.environment.dir = PathBuf::from(value),
        "environment.interpreter" => {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                    reason: "Interpreter must not be empty.".to_string(),
                }
                .into());
            }
            config.environment.interpreter = value.to_string();
        }
        "environment.min_python" => {
            semver::Version::parse(value).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                reason: format!("Not a valid version: {e}"),
            })?;
            config.environment.min_python = value.to_string();
        }
        "install.requirements" => config.install.requirements = PathBuf::from(value),
        "install.index_url" => {
            validate_index_url(value)?;
            config.install.index_url = value.to_string();
        }
        "install.package_manager" => config.install.package_manager = value.to_string(),
        "prepare.entrypoint" => config.prepare.entrypoint = PathBuf::from(value),
        "dashboard.entrypoint" => config.dashboard.entrypoint = PathBuf::from(value),
        "dashboard.port" => {
            let port: u16 = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
                reason: "Port must be an integer between 1024 and 65535.".to_string(),
            })?;
            validate_port(port)?;
            config.dashboard.port = port;
        }
        "dashboard.open_browser" => {
            config.dashboard.open_browser = match value {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                        reason: "Valid values: true, false".to_string(),
                    }
                    .into());
                }
            };
        }
        _ => unreachable!("key validated against whitelist"),
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
