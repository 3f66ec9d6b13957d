//! Application service — preflight diagnostics use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits. The service never
//! touches `OutputContext` or any presentation type — rendering is the
//! caller's responsibility.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{
    CommandRunner, IndexProbe, LocalFs, NetworkProbe, PortInspector, ProgressReporter, StateStore,
};
use crate::application::services::provision;
use crate::domain::config::LauncherConfig;
use crate::domain::health::{
    DashboardChecks, DoctorChecks, EnvironmentChecks, InterpreterChecks, NetworkChecks,
};
use crate::domain::requirements::parse_requirements;

/// Run the doctor probe workflow.
///
/// Every probe converts failure into a check result — doctor itself only
/// errors when a probe cannot execute at all.
///
/// # Errors
///
/// Returns an error if a port/state query fails to execute.
#[allow(clippy::too_many_arguments)] // one port per side effect; grouping them would hide the seams
pub async fn run_doctor(
    runner: &impl CommandRunner,
    local_fs: &impl LocalFs,
    ports: &impl PortInspector,
    network: &impl NetworkProbe,
    index: &impl IndexProbe,
    state_store: &impl StateStore,
    reporter: &impl ProgressReporter,
    config: &LauncherConfig,
) -> Result<DoctorChecks> {
    reporter.step("checking interpreter...");
    let interpreter = probe_interpreter(runner, config).await;

    reporter.step("checking environment...");
    let environment = probe_environment(local_fs, config);

    reporter.step("checking network...");
    let network = probe_network(network, index, &config.install.index_url).await;

    reporter.step("checking dashboard port...");
    let dashboard = probe_dashboard(ports, state_store, config.dashboard.port).await?;

    reporter.success("diagnostics complete");

    Ok(DoctorChecks {
        interpreter,
        environment,
        network,
        dashboard,
    })
}

// ── Internal probes ───────────────────────────────────────────────────────────

async fn probe_interpreter(
    runner: &impl CommandRunner,
    config: &LauncherConfig,
) -> InterpreterChecks {
    let version = provision::query_interpreter_version(runner, &config.environment.interpreter)
        .await
        .ok()
        .flatten();
    let Some(version) = version else {
        return InterpreterChecks {
            found: false,
            version: None,
            version_ok: false,
        };
    };

    let version_ok = semver::Version::parse(&config.environment.min_python)
        .map(|minimum| version >= minimum)
        .unwrap_or(false);

    InterpreterChecks {
        found: true,
        version: Some(version.to_string()),
        version_ok,
    }
}

fn probe_environment(local_fs: &impl LocalFs, config: &LauncherConfig) -> EnvironmentChecks {
    let env_present = local_fs.exists(&config.env_python());
    let requirements: &Path = &config.install.requirements;
    let requirements_present = local_fs.exists(requirements);
    let requirement_count = local_fs
        .read_to_string(requirements)
        .ok()
        .and_then(|text| parse_requirements(&text).ok())
        .map(|reqs| reqs.len());

    EnvironmentChecks {
        env_present,
        requirements_present,
        requirement_count,
    }
}

async fn probe_network(
    network: &impl NetworkProbe,
    index: &impl IndexProbe,
    index_url: &str,
) -> NetworkChecks {
    let internet = network
        .check_tcp_connectivity("8.8.8.8", 53)
        .await
        .unwrap_or(false);
    let dns = network.check_dns_resolution("pypi.org").await.unwrap_or(false);
    let index_reachable = index.is_reachable(index_url).await;
    NetworkChecks {
        internet,
        dns,
        index_reachable,
    }
}

async fn probe_dashboard(
    ports: &impl PortInspector,
    state_store: &impl StateStore,
    port: u16,
) -> Result<DashboardChecks> {
    let port_free = ports.listeners(port).await?.is_empty();
    let recorded_pid = state_store.load().ok().flatten().map(|s| s.pid);
    let recorded_pid_alive = match recorded_pid {
        Some(pid) => ports.is_alive(pid).await.unwrap_or(false),
        None => false,
    };
    Ok(DashboardChecks {
        port_free,
        recorded_pid,
        recorded_pid_alive,
    })
}
