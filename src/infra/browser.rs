//! Browser infrastructure — implements the `BrowserOpener` port with the
//! host's URL-opening command.

use std::time::Duration;

use anyhow::Result;

use crate::application::ports::{BrowserOpener, CommandRunner};
use crate::infra::command_runner::TokioCommandRunner;

/// `xdg-open` hands the URL to a launcher and returns; anything slower than
/// this means the host has no working opener.
const OPEN_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens URLs with `open` / `xdg-open` / `start` depending on the platform.
pub struct SystemBrowser<R: CommandRunner> {
    runner: R,
}

impl SystemBrowser<TokioCommandRunner> {
    /// Opener backed by the default command runner.
    #[must_use]
    pub fn default_runner() -> Self {
        Self::new(TokioCommandRunner::default())
    }
}

impl<R: CommandRunner> SystemBrowser<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> BrowserOpener for SystemBrowser<R> {
    async fn open(&self, url: &str) -> Result<()> {
        #[cfg(target_os = "macos")]
        let (program, args) = ("open", vec![url]);
        #[cfg(target_os = "windows")]
        let (program, args) = ("cmd", vec!["/C", "start", "", url]);
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let (program, args) = ("xdg-open", vec![url]);

        let output = self
            .runner
            .run_with_timeout(program, &args, OPEN_TIMEOUT)
            .await?;
        if !output.status.success() {
            anyhow::bail!(
                "{program} exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
