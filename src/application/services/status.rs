//! Application service — launcher status use-case.

use anyhow::{Context, Result};

use crate::application::ports::{LocalFs, PortInspector, StateStore};
use crate::domain::config::LauncherConfig;
use crate::domain::launch::LaunchState;
use crate::domain::requirements::parse_requirements;

/// Snapshot of everything the launcher owns: the environment, the recorded
/// dashboard process, and the port.
#[derive(Debug)]
pub struct StatusReport {
    /// Whether the isolated environment exists.
    pub environment_present: bool,
    /// Declared dependency count, when the requirements file parses.
    pub requirement_count: Option<usize>,
    /// Recorded dashboard launch, if any.
    pub recorded: Option<LaunchState>,
    /// Whether the recorded PID is still alive.
    pub recorded_alive: bool,
    /// Configured dashboard port.
    pub port: u16,
    /// PIDs currently listening on the configured port.
    pub port_listeners: Vec<u32>,
}

impl StatusReport {
    /// The dashboard is serving iff the recorded process is alive.
    #[must_use]
    pub fn serving(&self) -> bool {
        self.recorded_alive
    }
}

/// Gather the status snapshot.
///
/// # Errors
///
/// Returns an error if the state file is corrupt or the port query fails.
pub async fn gather_status(
    local_fs: &impl LocalFs,
    ports: &impl PortInspector,
    state_store: &impl StateStore,
    config: &LauncherConfig,
) -> Result<StatusReport> {
    let environment_present = local_fs.exists(&config.env_python());
    let requirement_count = local_fs
        .read_to_string(&config.install.requirements)
        .ok()
        .and_then(|text| parse_requirements(&text).ok())
        .map(|reqs| reqs.len());

    let recorded = state_store.load().context("loading launch state")?;
    let recorded_alive = match &recorded {
        Some(state) => ports.is_alive(state.pid).await.unwrap_or(false),
        None => false,
    };

    let port = config.dashboard.port;
    let port_listeners = ports.listeners(port).await?;

    Ok(StatusReport {
        environment_present,
        requirement_count,
        recorded,
        recorded_alive,
        port,
        port_listeners,
    })
}
