//! Journal entry storage.
//!
//! Persists entries and their tags to the local database.

use std::collections::BTreeSet;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::types::{EmotionalState, EntryKind, EntryMetadata, JournalEntry};
use crate::error::JustDadError;
use crate::storage::Database;

const ENTRY_COLUMNS: &str = "id, created_at, content, kind, emotion, prompt, intensity, related_visit, title";

/// Read access to journal entries.
///
/// Commands depend on this trait rather than on [`JournalStore`] so the
/// statistics path can be exercised without a database.
#[cfg_attr(test, mockall::automock)]
pub trait EntrySource {
    /// Every stored entry, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn all_entries(&self) -> Result<Vec<JournalEntry>, JustDadError>;

    /// Entries dated in `[start, end)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>, JustDadError>;
}

/// Storage for journal entries.
pub struct JournalStore {
    db: Database,
}

/// A row as read from `journal_entries`, before validation.
struct EntryRow {
    id: String,
    created_at: String,
    content: String,
    kind: String,
    emotion: Option<String>,
    prompt: Option<String>,
    intensity: Option<u8>,
    related_visit: Option<String>,
    title: Option<String>,
}

impl JournalStore {
    /// Open the store at the default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, JustDadError> {
        Ok(Self { db: Database::open()? })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Insert or replace an entry together with its tags.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn save(&self, entry: &JournalEntry) -> Result<(), JustDadError> {
        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .map_err(|e| JustDadError::Database(format!("Failed to begin transaction: {e}")))?;

        let (emotion, metadata, title) = match &entry.kind {
            EntryKind::Intelligent { emotion, metadata } => {
                (Some(emotion.as_str()), Some(metadata), None)
            },
            EntryKind::Traditional { title } => (None, None, title.as_deref()),
        };

        tx.execute(
            r"INSERT OR REPLACE INTO journal_entries
              (id, created_at, content, kind, emotion, prompt, intensity, related_visit, title)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entry.id,
                format_timestamp(entry.date),
                entry.content,
                entry.kind.label(),
                emotion,
                metadata.and_then(|m| m.prompt.as_deref()),
                metadata.and_then(|m| m.intensity),
                metadata.and_then(|m| m.related_visit.as_deref()),
                title,
            ],
        )
        .map_err(|e| JustDadError::Database(format!("Failed to save entry: {e}")))?;

        tx.execute("DELETE FROM journal_tags WHERE entry_id = ?1", [&entry.id])
            .map_err(|e| JustDadError::Database(format!("Failed to clear tags: {e}")))?;

        for tag in &entry.tags {
            tx.execute(
                "INSERT INTO journal_tags (entry_id, tag) VALUES (?1, ?2)",
                params![entry.id, tag],
            )
            .map_err(|e| JustDadError::Database(format!("Failed to save tag: {e}")))?;
        }

        tx.commit()
            .map_err(|e| JustDadError::Database(format!("Failed to commit entry: {e}")))?;

        info!(id = %entry.id, kind = entry.kind.label(), tags = entry.tags.len(), "saved journal entry");
        Ok(())
    }

    /// Get an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is malformed.
    pub fn get(&self, id: &str) -> Result<Option<JournalEntry>, JustDadError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                &format!("SELECT {ENTRY_COLUMNS} FROM journal_entries WHERE id = ?1"),
                [id],
                read_row,
            )
            .optional()
            .map_err(|e| JustDadError::Database(format!("Failed to query entry: {e}")))?;

        row.map(|r| self.hydrate(r)).transpose()
    }

    /// Delete an entry. Returns `false` if no entry had that ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete(&self, id: &str) -> Result<bool, JustDadError> {
        let removed = self
            .db
            .connection()
            .execute("DELETE FROM journal_entries WHERE id = ?1", [id])
            .map_err(|e| JustDadError::Database(format!("Failed to delete entry: {e}")))?;

        if removed > 0 {
            info!(id, "deleted journal entry");
        }
        Ok(removed > 0)
    }

    /// Most recent entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent(&self, limit: usize) -> Result<Vec<JournalEntry>, JustDadError> {
        self.query(
            &format!("SELECT {ENTRY_COLUMNS} FROM journal_entries ORDER BY created_at DESC LIMIT ?1"),
            &[&i64::try_from(limit).unwrap_or(i64::MAX)],
        )
    }

    /// Entries carrying `tag`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn with_tag(&self, tag: &str) -> Result<Vec<JournalEntry>, JustDadError> {
        self.query(
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM journal_entries
                 WHERE id IN (SELECT entry_id FROM journal_tags WHERE tag = ?1)
                 ORDER BY created_at DESC"
            ),
            &[&tag],
        )
    }

    /// IDs starting with `prefix`, so short IDs from list output can be used.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn ids_with_prefix(&self, prefix: &str) -> Result<Vec<String>, JustDadError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id FROM journal_entries WHERE substr(id, 1, length(?1)) = ?1 ORDER BY id")
            .map_err(|e| JustDadError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([prefix], |row| row.get::<_, String>(0))
            .map_err(|e| JustDadError::Database(format!("Failed to query ids: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| JustDadError::Database(e.to_string()))
    }

    fn query(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<JournalEntry>, JustDadError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| JustDadError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(params, read_row)
            .map_err(|e| JustDadError::Database(format!("Failed to query entries: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            let row = row.map_err(|e| JustDadError::Database(e.to_string()))?;
            entries.push(self.hydrate(row)?);
        }

        debug!(count = entries.len(), "loaded journal entries");
        Ok(entries)
    }

    fn tags_for(&self, id: &str) -> Result<BTreeSet<String>, JustDadError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare_cached("SELECT tag FROM journal_tags WHERE entry_id = ?1")
            .map_err(|e| JustDadError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([id], |row| row.get::<_, String>(0))
            .map_err(|e| JustDadError::Database(format!("Failed to query tags: {e}")))?;

        rows.collect::<Result<BTreeSet<_>, _>>()
            .map_err(|e| JustDadError::Database(e.to_string()))
    }

    fn hydrate(&self, row: EntryRow) -> Result<JournalEntry, JustDadError> {
        let tags = self.tags_for(&row.id)?;
        row_to_entry(row, tags)
    }
}

impl EntrySource for JournalStore {
    fn all_entries(&self) -> Result<Vec<JournalEntry>, JustDadError> {
        self.query(
            &format!("SELECT {ENTRY_COLUMNS} FROM journal_entries ORDER BY created_at"),
            &[],
        )
    }

    fn entries_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<JournalEntry>, JustDadError> {
        self.query(
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM journal_entries
                 WHERE created_at >= ?1 AND created_at < ?2
                 ORDER BY created_at"
            ),
            &[&format_timestamp(start), &format_timestamp(end)],
        )
    }
}

/// Timestamps are stored as fixed-width UTC RFC 3339 so text order is time order.
fn format_timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn read_row(row: &Row) -> rusqlite::Result<EntryRow> {
    Ok(EntryRow {
        id: row.get(0)?,
        created_at: row.get(1)?,
        content: row.get(2)?,
        kind: row.get(3)?,
        emotion: row.get(4)?,
        prompt: row.get(5)?,
        intensity: row.get(6)?,
        related_visit: row.get(7)?,
        title: row.get(8)?,
    })
}

fn row_to_entry(row: EntryRow, tags: BTreeSet<String>) -> Result<JournalEntry, JustDadError> {
    let date = DateTime::parse_from_rfc3339(&row.created_at)
        .map_err(|e| {
            JustDadError::Parse(format!("Invalid date '{}' on entry {}: {e}", row.created_at, row.id))
        })?
        .with_timezone(&Utc);

    let kind = match row.kind.as_str() {
        "intelligent" => {
            let emotion = row
                .emotion
                .as_deref()
                .ok_or_else(|| JustDadError::Parse(format!("Entry {} has no emotion", row.id)))?
                .parse::<EmotionalState>()?;
            EntryKind::Intelligent {
                emotion,
                metadata: EntryMetadata {
                    prompt: row.prompt,
                    intensity: row.intensity,
                    related_visit: row.related_visit,
                },
            }
        },
        "traditional" => EntryKind::Traditional { title: row.title },
        other => {
            return Err(JustDadError::Parse(format!(
                "Unknown entry kind '{other}' on entry {}",
                row.id
            )))
        },
    };

    Ok(JournalEntry {
        id: row.id,
        date,
        content: row.content,
        tags,
        kind,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> JournalStore {
        JournalStore::with_database(Database::open_in_memory().unwrap())
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn intelligent(date: DateTime<Utc>, emotion: EmotionalState) -> JournalEntry {
        JournalEntry::new(
            date,
            "talked to the kids on the phone",
            EntryKind::Intelligent {
                emotion,
                metadata: EntryMetadata {
                    prompt: Some("What went well today?".to_string()),
                    intensity: Some(7),
                    related_visit: None,
                },
            },
        )
    }

    #[test]
    fn test_save_and_get() {
        let store = store();
        let entry = intelligent(at(3, 9), EmotionalState::Hopeful).with_tags(["visit", "phone"]);

        store.save(&entry).unwrap();

        let loaded = store.get(&entry.id).unwrap().unwrap();
        assert_eq!(loaded, entry);
    }

    #[test]
    fn test_get_missing() {
        assert!(store().get("nope").unwrap().is_none());
    }

    #[test]
    fn test_save_replaces_tags() {
        let store = store();
        let mut entry = JournalEntry::new(at(1, 8), "notes", EntryKind::Traditional { title: None })
            .with_tags(["school"]);
        store.save(&entry).unwrap();

        entry.tags = ["dentist".to_string()].into_iter().collect();
        store.save(&entry).unwrap();

        let loaded = store.get(&entry.id).unwrap().unwrap();
        assert_eq!(loaded.tags.into_iter().collect::<Vec<_>>(), vec!["dentist"]);
        assert_eq!(store.all_entries().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_cascades_tags() {
        let store = store();
        let entry = JournalEntry::new(at(2, 8), "x", EntryKind::Traditional { title: None })
            .with_tags(["school"]);
        store.save(&entry).unwrap();

        assert!(store.delete(&entry.id).unwrap());
        assert!(!store.delete(&entry.id).unwrap());

        let orphans: i64 = store
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM journal_tags", [], |row| row.get(0))
            .unwrap();
        assert_eq!(orphans, 0);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let store = store();
        for day in [4, 1, 9, 6] {
            store
                .save(&JournalEntry::new(at(day, 12), "x", EntryKind::Traditional { title: None }))
                .unwrap();
        }

        let recent = store.recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].date, at(9, 12));
        assert_eq!(recent[1].date, at(6, 12));
    }

    #[test]
    fn test_with_tag() {
        let store = store();
        let tagged = JournalEntry::new(at(1, 8), "x", EntryKind::Traditional { title: None })
            .with_tags(["dentist"]);
        let other = JournalEntry::new(at(2, 8), "y", EntryKind::Traditional { title: None })
            .with_tags(["school"]);
        store.save(&tagged).unwrap();
        store.save(&other).unwrap();

        let found = store.with_tag("dentist").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, tagged.id);
    }

    #[test]
    fn test_entries_between_is_half_open() {
        let store = store();
        for day in [1, 2, 3] {
            store
                .save(&JournalEntry::new(at(day, 0), "x", EntryKind::Traditional { title: None }))
                .unwrap();
        }

        let found = store.entries_between(at(1, 0), at(3, 0)).unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(store.all_entries().unwrap().len(), 3);
    }

    #[test]
    fn test_ids_with_prefix() {
        let store = store();
        let mut a = JournalEntry::new(at(1, 8), "x", EntryKind::Traditional { title: None });
        a.id = "abc123".to_string();
        let mut b = JournalEntry::new(at(1, 9), "y", EntryKind::Traditional { title: None });
        b.id = "abd456".to_string();
        store.save(&a).unwrap();
        store.save(&b).unwrap();

        assert_eq!(store.ids_with_prefix("abc").unwrap(), vec!["abc123"]);
        assert_eq!(store.ids_with_prefix("ab").unwrap().len(), 2);
        assert!(store.ids_with_prefix("zz").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_emotion_is_parse_error() {
        let store = store();
        store
            .db
            .connection()
            .execute(
                "INSERT INTO journal_entries (id, created_at, content, kind, emotion)
                 VALUES ('bad', '2024-05-01T00:00:00.000000Z', 'x', 'intelligent', 'ecstatic')",
                [],
            )
            .unwrap();

        let err = store.get("bad").unwrap_err();
        assert!(matches!(err, JustDadError::Parse(_)));
    }
}
