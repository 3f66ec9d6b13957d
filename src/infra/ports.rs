//! Port inspection infrastructure — implements `PortInspector` with the
//! OS tools the workflow has always relied on (`lsof`, `kill`).

use anyhow::Result;

use crate::application::ports::{CommandRunner, PortInspector};
use crate::infra::command_runner::TokioCommandRunner;

/// Queries listeners with `lsof` and terminates with `kill`.
pub struct LsofPortInspector<R: CommandRunner> {
    runner: R,
}

impl LsofPortInspector<TokioCommandRunner> {
    /// Inspector backed by the default command runner.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> LsofPortInspector<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> PortInspector for LsofPortInspector<R> {
    async fn listeners(&self, port: u16) -> Result<Vec<u32>> {
        let iface = format!("-iTCP:{port}");
        // Hosts without lsof cannot be inspected; a conflicting bind will
        // still surface at serve time.
        let Ok(output) = self
            .runner
            .run("lsof", &["-t", &iface, "-sTCP:LISTEN"])
            .await
        else {
            return Ok(Vec::new());
        };
        // lsof exits 1 when nothing matches — the normal free-port case
        if !output.status.success() {
            return Ok(Vec::new());
        }
        Ok(parse_pids(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn is_alive(&self, pid: u32) -> Result<bool> {
        let Ok(output) = self.runner.run("kill", &["-0", &pid.to_string()]).await else {
            return Ok(false);
        };
        Ok(output.status.success())
    }

    async fn terminate(&self, pid: u32) -> Result<()> {
        // Exit status deliberately ignored: a process that died between the
        // query and the kill is a success, not a failure.
        let _ = self.runner.run("kill", &["-9", &pid.to_string()]).await?;
        Ok(())
    }
}

/// Parse `lsof -t` output: one PID per line.
#[must_use]
pub fn parse_pids(text: &str) -> Vec<u32> {
    text.lines()
        .filter_map(|line| line.trim().parse::<u32>().ok())
        .collect()
}
