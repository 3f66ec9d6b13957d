//! Application service — cleanup use-case.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{LocalFs, ProgressReporter, StateStore};
use crate::application::services::provision;
use crate::domain::config::LauncherConfig;

/// What a cleanup pass actually removed.
#[derive(Debug, Clone, Copy)]
pub struct CleanReport {
    /// Bytecode cache directories deleted.
    pub caches_removed: usize,
    /// Whether the environment directory was deleted.
    pub environment_removed: bool,
    /// Whether the recorded launch state was cleared.
    pub state_cleared: bool,
}

/// Purge bytecode caches; with `all`, also remove the environment and the
/// recorded launch state.
///
/// # Errors
///
/// Returns an error if a removal fails.
pub fn clean(
    local_fs: &impl LocalFs,
    state_store: &impl StateStore,
    reporter: &impl ProgressReporter,
    config: &LauncherConfig,
    all: bool,
) -> Result<CleanReport> {
    let caches_removed = provision::purge_bytecode_caches(local_fs, Path::new("."))?;
    if caches_removed > 0 {
        reporter.step(&format!("purged {caches_removed} bytecode cache directories"));
    }

    let mut environment_removed = false;
    let mut state_cleared = false;
    if all {
        let env_dir = &config.environment.dir;
        if local_fs.exists(env_dir) {
            reporter.step(&format!("removing environment {}...", env_dir.display()));
            local_fs.remove_dir_all(env_dir)?;
            environment_removed = true;
        }
        state_store.clear()?;
        state_cleared = true;
    }

    Ok(CleanReport {
        caches_removed,
        environment_removed,
        state_cleared,
    })
}
