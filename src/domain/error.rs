//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Environment errors ────────────────────────────────────────────────────────

/// Errors related to the isolated Python environment.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    #[error("Interpreter '{0}' not found on PATH. Install it before running fantabasket.")]
    InterpreterMissing(String),

    #[error("Interpreter '{interpreter}' is {found}, but {required}+ is required.")]
    InterpreterTooOld {
        interpreter: String,
        found: String,
        required: String,
    },

    #[error("Cannot parse interpreter version from: {0}")]
    UnparsableVersion(String),

    #[error("Environment creation failed:\n{0}")]
    CreationFailed(String),
}

// ── Install errors ────────────────────────────────────────────────────────────

/// Errors related to dependency installation.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Requirements file not found: {0}")]
    RequirementsMissing(String),

    #[error("Malformed requirement on line {line}: {text}")]
    MalformedRequirement { line: usize, text: String },

    #[error("Bootstrapping '{tool}' into the environment failed:\n{stderr}")]
    BootstrapFailed { tool: String, stderr: String },

    #[error("Dependency installation failed:\n{0}")]
    InstallFailed(String),
}

// ── Launch errors ─────────────────────────────────────────────────────────────

/// Errors related to port reclaim and dashboard launch.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(
        "Port {port} is held by pid {pid}, which is not the recorded dashboard. \
Stop it yourself or re-run with --by-port to terminate any listener."
    )]
    PortHeldByStranger { port: u16, pid: u32 },

    #[error("Data preparation failed with exit code {0}. Re-run with --allow-stale to launch anyway.")]
    PrepareFailed(i32),

    #[error("Invalid recorded pid: {0}")]
    InvalidPid(u32),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
