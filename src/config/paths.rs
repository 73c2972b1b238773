//! Path resolution for justdad configuration and data files.
//!
//! All data is stored in `~/.justdad/` (or `$JUSTDAD_HOME`):
//! - `config.yaml` - Main configuration file
//! - `justdad.db` - SQLite database holding journal entries

use std::path::PathBuf;

use crate::error::JustDadError;

/// Environment variable that overrides the data directory.
pub const HOME_ENV: &str = "JUSTDAD_HOME";

/// Paths to justdad configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.justdad/`
    pub root: PathBuf,
    /// Config file: `~/.justdad/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.justdad/justdad.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `$JUSTDAD_HOME`, falling back to `$HOME/.justdad`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, JustDadError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            JustDadError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".justdad")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("justdad.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), JustDadError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                JustDadError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
