//! Configuration settings for justdad.
//!
//! Settings are loaded from `~/.justdad/config.yaml`.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::JustDadError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Journal and statistics settings.
    pub journal: JournalConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Output format used when `--output` is not given.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
}

/// First day of the week for weekly counts.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// ISO weeks.
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// The corresponding chrono weekday.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

/// Journal statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// First day of the week.
    #[serde(default)]
    pub week_start: WeekStart,
    /// How many tags the `stats tags` view lists.
    #[serde(default = "default_top_tags")]
    pub top_tags: usize,
    /// Days shown by `stats trends`.
    #[serde(default = "default_trend_days")]
    pub trend_days: usize,
}

const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_top_tags() -> usize {
    5
}

const fn default_trend_days() -> usize {
    30
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
        }
    }
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            top_tags: default_top_tags(),
            trend_days: default_trend_days(),
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, JustDadError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, JustDadError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            JustDadError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            JustDadError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), JustDadError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| JustDadError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            JustDadError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}
