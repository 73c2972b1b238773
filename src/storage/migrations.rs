//! Database migrations for justdad.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;
use tracing::debug;

use crate::error::JustDadError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, JustDadError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| JustDadError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), JustDadError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| JustDadError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), JustDadError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        debug!(version, "applying schema migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), JustDadError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(JustDadError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// - `journal_entries`: one row per entry; emotion and metadata columns are
///   only populated for intelligent entries
/// - `journal_tags`: entry tags, removed with their entry
fn migrate_v1(conn: &Connection) -> Result<(), JustDadError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS journal_entries (
            id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            content TEXT NOT NULL,
            kind TEXT NOT NULL,
            emotion TEXT,
            prompt TEXT,
            intensity INTEGER,
            related_visit TEXT,
            title TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_journal_entries_created
        ON journal_entries(created_at);

        CREATE TABLE IF NOT EXISTS journal_tags (
            entry_id TEXT NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
            tag TEXT NOT NULL,
            PRIMARY KEY (entry_id, tag)
        );

        CREATE INDEX IF NOT EXISTS idx_journal_tags_tag
        ON journal_tags(tag);
        ",
    )
    .map_err(|e| JustDadError::Database(format!("Migration v1 failed: {e}")))
}
