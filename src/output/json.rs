//! JSON output formatting for justdad.

use serde::Serialize;
use serde_json::json;

use crate::error::JustDadError;
use crate::journal::JournalEntry;

/// Format entries as JSON
///
/// # Errors
///
/// Returns `JustDadError::Json` if JSON serialization fails.
pub fn format_entries_json(entries: &[JournalEntry], title: &str) -> Result<String, JustDadError> {
    let output = json!({
        "list": title,
        "count": entries.len(),
        "items": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `JustDadError::Json` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, JustDadError> {
    Ok(serde_json::to_string_pretty(value)?)
}
