//! Application service — port reclaim use-case.
//!
//! The reclaim is scoped: it terminates the dashboard process recorded in
//! the launch state, not whatever happens to hold the port. Port-wide
//! termination exists only as an explicit opt-in, because killing by port
//! number alone can take down an unrelated service.

use anyhow::{Context, Result};

use crate::application::ports::{PortInspector, ProgressReporter, StateStore};
use crate::domain::error::LaunchError;
use crate::domain::launch::validate_pid;

/// Outcome of the `reclaim_port` use-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReclaimOutcome {
    /// Nothing was terminated — no recorded process, nothing on the port.
    NothingHeld,
    /// The recorded dashboard process was terminated.
    TerminatedRecorded { pid: u32 },
    /// Port-wide fallback terminated these listeners.
    TerminatedListeners { pids: Vec<u32> },
}

/// Free the dashboard port before a launch.
///
/// Primary path: terminate the recorded dashboard PID if it is still alive,
/// then drop the stale record. Fallback path (`by_port`): terminate every
/// remaining listener on `port`. Finding nothing to do is the normal case
/// on first launch and must not fail.
///
/// # Errors
///
/// Returns an error if the state file is corrupt, carries an invalid PID,
/// or a termination command cannot be executed.
pub async fn reclaim_port(
    ports: &impl PortInspector,
    state_store: &impl StateStore,
    reporter: &impl ProgressReporter,
    port: u16,
    by_port: bool,
) -> Result<ReclaimOutcome> {
    let mut recorded = None;
    if let Some(state) = state_store.load().context("loading launch state")? {
        validate_pid(state.pid)?;
        if ports.is_alive(state.pid).await? {
            reporter.step(&format!("stopping recorded dashboard (pid {})...", state.pid));
            ports.terminate(state.pid).await?;
            recorded = Some(state.pid);
        }
        // The record is stale either way once the process is gone.
        state_store.clear()?;
    }

    if by_port {
        let pids: Vec<u32> = ports
            .listeners(port)
            .await?
            .into_iter()
            .filter(|pid| Some(*pid) != recorded)
            .collect();
        if !pids.is_empty() {
            reporter.step(&format!("terminating {} listener(s) on port {port}...", pids.len()));
            for pid in &pids {
                ports.terminate(*pid).await?;
            }
            return Ok(ReclaimOutcome::TerminatedListeners { pids });
        }
    }

    Ok(match recorded {
        Some(pid) => ReclaimOutcome::TerminatedRecorded { pid },
        None => ReclaimOutcome::NothingHeld,
    })
}

/// Verify the port has no remaining listener before the server is spawned.
///
/// # Errors
///
/// Returns [`LaunchError::PortHeldByStranger`] naming the first holder when
/// the port is still occupied after a scoped reclaim.
pub async fn ensure_port_free(ports: &impl PortInspector, port: u16) -> Result<()> {
    if let Some(&pid) = ports.listeners(port).await?.first() {
        return Err(LaunchError::PortHeldByStranger { port, pid }.into());
    }
    Ok(())
}
