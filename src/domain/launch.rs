//! Launch state types and pure validation functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::error::LaunchError;

/// Last-started dashboard process, persisted to `~/.fantabasket/state.json`.
///
/// Recording the PID lets the port reclaimer terminate exactly the process
/// this tool started, instead of whatever happens to hold the port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchState {
    /// PID of the dashboard server process.
    pub pid: u32,
    /// Port the server was asked to bind.
    pub port: u16,
    /// Entrypoint the server was started from.
    pub entrypoint: PathBuf,
    /// When the server was started (UTC).
    pub started_at: DateTime<Utc>,
}

impl LaunchState {
    /// Record a freshly spawned dashboard process.
    #[must_use]
    pub fn new(pid: u32, port: u16, entrypoint: PathBuf, started_at: DateTime<Utc>) -> Self {
        Self {
            pid,
            port,
            entrypoint,
            started_at,
        }
    }
}

/// Validates a recorded PID.
///
/// PID 0 addresses the caller's own process group on unix; a state file
/// carrying it must be rejected before any termination is attempted.
///
/// # Errors
///
/// Returns an error if the PID is zero.
pub fn validate_pid(pid: u32) -> Result<()> {
    if pid == 0 {
        return Err(LaunchError::InvalidPid(pid).into());
    }
    Ok(())
}
