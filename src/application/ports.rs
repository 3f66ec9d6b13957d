//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;

use anyhow::Result;

use crate::domain::launch::LaunchState;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Every workflow stage is a blocking subprocess behind this trait; the
/// strict stage ordering of the launcher falls out of awaiting each call.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: std::time::Duration,
    ) -> Result<Output>;

    /// Run a program with inherited stdio and return only its exit status.
    /// No timeout — used for long stages whose output belongs to the
    /// operator (data preparation, dependency installation).
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<std::process::ExitStatus>;

    /// Spawn a program with inherited stdio and return the child handle.
    /// No timeout — caller manages the child lifetime.
    /// `kill_on_drop(true)` is set as a safety net.
    ///
    /// # Errors
    ///
    /// Returns an error if the process fails to spawn.
    fn spawn_foreground(&self, program: &str, args: &[&str]) -> Result<tokio::process::Child>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── State Port ────────────────────────────────────────────────────────────────

/// Abstracts launch state persistence (load/save/clear).
pub trait StateStore {
    /// Load the recorded launch state, returning `None` if no state exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<Option<LaunchState>>;

    /// Persist the given launch state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be written.
    fn save(&self, state: &LaunchState) -> Result<()>;

    /// Remove the recorded launch state. No-op when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn clear(&self) -> Result<()>;
}

// ── Port Inspection Port ──────────────────────────────────────────────────────

/// Abstracts OS-level process/port queries so the reclaimer can be tested
/// without binding sockets or killing anything real.
#[allow(async_fn_in_trait)]
pub trait PortInspector {
    /// PIDs currently holding a listening TCP socket on `port`.
    /// An empty result is the normal "port free" case, not an error.
    async fn listeners(&self, port: u16) -> Result<Vec<u32>>;

    /// Whether `pid` refers to a live process.
    async fn is_alive(&self, pid: u32) -> Result<bool>;

    /// Terminate `pid`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the termination command cannot be executed;
    /// an already-gone process is not an error.
    async fn terminate(&self, pid: u32) -> Result<()>;
}

// ── Network Probe Ports ───────────────────────────────────────────────────────

/// Abstracts network connectivity checks so application services can be tested
/// without real network access.
#[allow(async_fn_in_trait)]
pub trait NetworkProbe {
    /// Check TCP connectivity to the given host and port.
    async fn check_tcp_connectivity(&self, host: &str, port: u16) -> Result<bool>;
    /// Check DNS resolution for the given hostname.
    async fn check_dns_resolution(&self, hostname: &str) -> Result<bool>;
}

/// Abstracts the package-index reachability probe.
#[allow(async_fn_in_trait)]
pub trait IndexProbe {
    /// Whether the index URL answers an HTTP request at all.
    async fn is_reachable(&self, url: &str) -> bool;
}

// ── Browser Port ──────────────────────────────────────────────────────────────

/// Abstracts opening a URL in the default browser.
///
/// The launcher treats this as best-effort: callers ignore the `Err` case
/// beyond a warning, so the contract is "try once, report, never block".
#[allow(async_fn_in_trait)]
pub trait BrowserOpener {
    /// Open `url` in the host's default browser.
    async fn open(&self, url: &str) -> Result<()>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts local filesystem access for services.
pub trait LocalFs {
    /// Whether the path exists.
    fn exists(&self, path: &Path) -> bool;
    /// Read a file to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Remove a directory tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be removed.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    /// Find every directory named `name` anywhere under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the walk fails in a way other than a vanished
    /// entry (concurrent deletion is tolerated).
    fn find_dirs_named(&self, root: &Path, name: &str) -> Result<Vec<PathBuf>>;
}
