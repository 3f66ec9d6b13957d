//! Configuration file persistence.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::config::LauncherConfig;

/// Loads and saves the launcher configuration as YAML on disk.
///
/// A missing file is valid — every field has a documented default — so the
/// tool works out of the box in a fresh checkout.
pub struct YamlConfigStore;

impl YamlConfigStore {
    /// Load the configuration, falling back to defaults when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<LauncherConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(LauncherConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
    }

    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self, config: &LauncherConfig) -> Result<()> {
        let path = self.path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
        let content = serde_yaml::to_string(config).context("cannot serialize config")?;
        std::fs::write(&path, content)
            .with_context(|| format!("cannot write {}", path.display()))?;
        Ok(())
    }

    /// Resolve the config file path. `FANTABASKET_CONFIG` overrides the
    /// default `~/.fantabasket/config.yaml` so tests and multi-project
    /// setups can point elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var("FANTABASKET_CONFIG") {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".fantabasket").join("config.yaml"))
    }
}
