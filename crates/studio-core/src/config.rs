//! Workbench configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use studio_navigation::WELCOME_PATH;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Absolute project directory, with a trailing separator
    pub project_root: String,
    /// Path to the database file holding the tab strip
    pub database_path: PathBuf,
    /// Location shown once every tab is closed
    pub welcome_path: String,
    /// Restore open tabs across restarts
    pub persist_tabs: bool,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            project_root: String::new(),
            database_path: data_dir.join("studio.db"),
            welcome_path: WELCOME_PATH.to_string(),
            persist_tabs: true,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Studio"))
            .unwrap_or_else(|| PathBuf::from(".studio"))
    }

    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !self.welcome_path.starts_with('/') {
            return Err(CoreError::Config(format!(
                "welcome_path must be absolute, got {:?}",
                self.welcome_path
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}
