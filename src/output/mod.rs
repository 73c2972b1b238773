//! Output formatting for justdad.
//!
//! This module provides formatters for displaying journal entries in
//! various formats.

mod json;
mod pretty;

use std::fmt::Display;

use chrono::TimeZone;

use crate::cli::args::OutputFormat;
use crate::error::JustDadError;
use crate::journal::JournalEntry;

pub use json::*;
pub use pretty::*;

/// Format entries based on output format. Pretty output shows times in `tz`;
/// JSON keeps UTC.
///
/// # Errors
///
/// Returns `JustDadError::Json` if JSON serialization fails.
pub fn format_entries<Tz>(
    entries: &[JournalEntry],
    title: &str,
    tz: &Tz,
    format: OutputFormat,
) -> Result<String, JustDadError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match format {
        OutputFormat::Pretty => Ok(format_entries_pretty(entries, title, tz)),
        OutputFormat::Json => format_entries_json(entries, title),
    }
}

/// Format a single entry based on output format
///
/// # Errors
///
/// Returns `JustDadError::Json` if JSON serialization fails.
pub fn format_entry<Tz>(
    entry: &JournalEntry,
    tz: &Tz,
    format: OutputFormat,
) -> Result<String, JustDadError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match format {
        OutputFormat::Pretty => Ok(format_entry_pretty(entry, tz)),
        OutputFormat::Json => to_json(entry),
    }
}
