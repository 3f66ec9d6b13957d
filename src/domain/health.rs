//! Health check domain types and pure diagnostic functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use serde::Serialize;

// ── Types ─────────────────────────────────────────────────────────────────────

/// All check categories returned by the doctor command.
#[derive(Debug)]
pub struct DoctorChecks {
    /// Host interpreter checks.
    pub interpreter: InterpreterChecks,
    /// Environment and requirements checks.
    pub environment: EnvironmentChecks,
    /// Network health.
    pub network: NetworkChecks,
    /// Dashboard port and recorded process checks.
    pub dashboard: DashboardChecks,
}

/// Host interpreter checks.
#[derive(Debug, Serialize)]
pub struct InterpreterChecks {
    /// Whether the configured interpreter is on PATH.
    pub found: bool,
    /// Reported version string (e.g. `"3.13.2"`), if found.
    pub version: Option<String>,
    /// Whether the version meets the configured minimum.
    pub version_ok: bool,
}

/// Environment and requirements checks.
#[derive(Debug, Serialize)]
pub struct EnvironmentChecks {
    /// Whether the isolated environment exists (its interpreter is present).
    pub env_present: bool,
    /// Whether the requirements declaration exists.
    pub requirements_present: bool,
    /// Number of declared dependencies, when the file parses.
    pub requirement_count: Option<usize>,
}

/// Network health checks.
#[derive(Debug, Serialize)]
pub struct NetworkChecks {
    /// Whether internet connectivity is available.
    pub internet: bool,
    /// Whether DNS resolution is working.
    pub dns: bool,
    /// Whether the configured package index answers.
    pub index_reachable: bool,
}

/// Dashboard port and recorded process checks.
#[derive(Debug, Serialize)]
pub struct DashboardChecks {
    /// Whether the configured port has no listener.
    pub port_free: bool,
    /// PID recorded in the launch state, if any.
    pub recorded_pid: Option<u32>,
    /// Whether the recorded PID is still alive.
    pub recorded_pid_alive: bool,
}

// ── Pure functions ────────────────────────────────────────────────────────────

/// Collect actionable issues from check results.
///
/// A stale state file (recorded PID no longer alive) is cleaned up by the
/// next `run`, so it is a warning for the renderer, not an issue here.
#[must_use]
pub fn collect_issues(checks: &DoctorChecks) -> Vec<String> {
    let mut issues = Vec::new();
    if !checks.interpreter.found {
        issues.push("Configured interpreter not found on PATH".to_string());
    } else if !checks.interpreter.version_ok {
        issues.push(format!(
            "Interpreter too old ({})",
            checks.interpreter.version.as_deref().unwrap_or("unknown"),
        ));
    }
    if !checks.environment.requirements_present {
        issues.push("Requirements file not found".to_string());
    }
    if !checks.network.dns {
        issues.push("DNS resolution failed".to_string());
    }
    if !checks.network.index_reachable {
        issues.push("Package index not reachable".to_string());
    }
    if !checks.dashboard.port_free && !checks.dashboard.recorded_pid_alive {
        issues.push("Dashboard port held by an unrecorded process".to_string());
    }
    issues
}

// ── Tests ─────────────────────────────────────────────────────────────────────
