//! Configuration management for justdad.
//!
//! This module handles loading and saving configuration from `~/.justdad/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, GeneralConfig, JournalConfig, WeekStart};
