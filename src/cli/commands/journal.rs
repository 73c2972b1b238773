//! Journal entry commands: add, list, show, delete.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use colored::Colorize;
use serde_json::json;
use tracing::debug;

use crate::cli::args::{AddArgs, OutputFormat};
use crate::error::JustDadError;
use crate::journal::{
    extract_hashtags, normalize_tag, Clock, EntryKind, EntryMetadata, JournalEntry, JournalStore,
};
use crate::output::{format_entries, format_entry, to_json};

/// Build an entry from `add` arguments.
///
/// # Errors
///
/// Returns `JustDadError::InvalidArgument` for empty content or an
/// unparseable `--date`.
pub fn build_entry<Tz: TimeZone>(
    args: AddArgs,
    now: &DateTime<Tz>,
) -> Result<JournalEntry, JustDadError> {
    let content = args.content.trim();
    if content.is_empty() {
        return Err(JustDadError::InvalidArgument(
            "Entry content cannot be empty".to_string(),
        ));
    }

    let date = match args.date.as_deref() {
        Some(input) => parse_entry_date(input, now)?,
        None => now.with_timezone(&Utc),
    };

    let kind = match args.emotion {
        Some(emotion) => EntryKind::Intelligent {
            emotion,
            metadata: EntryMetadata {
                prompt: args.prompt,
                intensity: args.intensity,
                related_visit: args.visit,
            },
        },
        None => EntryKind::Traditional { title: args.title },
    };

    let tags: Vec<String> = args
        .tags
        .iter()
        .filter_map(|t| normalize_tag(t))
        .chain(extract_hashtags(content))
        .collect();

    Ok(JournalEntry::new(date, content, kind).with_tags(tags))
}

/// Parse `--date`: RFC 3339, or a bare day taken as noon in `now`'s timezone,
/// using the offset in effect on that day.
fn parse_entry_date<Tz: TimeZone>(
    input: &str,
    now: &DateTime<Tz>,
) -> Result<DateTime<Utc>, JustDadError> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Ok(instant.with_timezone(&Utc));
    }

    let day = NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        JustDadError::InvalidArgument(format!(
            "Invalid date '{input}': expected YYYY-MM-DD or an RFC 3339 timestamp"
        ))
    })?;

    day.and_hms_opt(12, 0, 0)
        .and_then(|noon| now.timezone().from_local_datetime(&noon).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| JustDadError::InvalidArgument(format!("Invalid date '{input}'")))
}

/// Execute `add`.
///
/// # Errors
///
/// Returns an error if the arguments are invalid or the entry cannot be saved.
pub fn add<C: Clock>(
    store: &JournalStore,
    clock: &C,
    args: AddArgs,
    format: OutputFormat,
) -> Result<String, JustDadError> {
    let entry = build_entry(args, &clock.now())?;
    store.save(&entry)?;

    match format {
        OutputFormat::Json => to_json(&entry),
        OutputFormat::Pretty => Ok(format!(
            "{} {} ({} words{})",
            "Saved".green().bold(),
            entry.id.dimmed(),
            entry.word_count(),
            if entry.tags.is_empty() {
                String::new()
            } else {
                format!(", {} tags", entry.tags.len())
            }
        )),
    }
}

/// Execute `list`.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list<C>(
    store: &JournalStore,
    clock: &C,
    limit: usize,
    tag: Option<&str>,
    format: OutputFormat,
) -> Result<String, JustDadError>
where
    C: Clock,
    <C::Tz as TimeZone>::Offset: Display,
{
    let tz = clock.now().timezone();
    match tag.and_then(normalize_tag) {
        Some(tag) => {
            let mut entries = store.with_tag(&tag)?;
            entries.truncate(limit);
            format_entries(&entries, &format!("Entries tagged #{tag}"), &tz, format)
        },
        None => format_entries(&store.recent(limit)?, "Recent entries", &tz, format),
    }
}

/// Execute `show`.
///
/// # Errors
///
/// Returns `JustDadError::NotFound` if no entry matches.
pub fn show<C>(
    store: &JournalStore,
    clock: &C,
    id: &str,
    format: OutputFormat,
) -> Result<String, JustDadError>
where
    C: Clock,
    <C::Tz as TimeZone>::Offset: Display,
{
    let id = resolve_id(store, id)?;
    let entry = store
        .get(&id)?
        .ok_or_else(|| JustDadError::NotFound(format!("entry {id}")))?;
    format_entry(&entry, &clock.now().timezone(), format)
}

/// Execute `delete`.
///
/// # Errors
///
/// Returns `JustDadError::NotFound` if no entry matches.
pub fn delete(store: &JournalStore, id: &str, format: OutputFormat) -> Result<String, JustDadError> {
    let id = resolve_id(store, id)?;
    if !store.delete(&id)? {
        return Err(JustDadError::NotFound(format!("entry {id}")));
    }

    match format {
        OutputFormat::Json => to_json(&json!({ "deleted": id })),
        OutputFormat::Pretty => Ok(format!("{} {}", "Deleted".red().bold(), id)),
    }
}

/// Expand a full or abbreviated entry ID to exactly one stored ID.
fn resolve_id(store: &JournalStore, id: &str) -> Result<String, JustDadError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(JustDadError::InvalidArgument("Entry ID cannot be empty".to_string()));
    }

    let mut matches = store.ids_with_prefix(id)?;
    debug!(prefix = id, matches = matches.len(), "resolving entry id");

    match matches.len() {
        0 => Err(JustDadError::NotFound(format!("entry {id}"))),
        1 => Ok(matches.remove(0)),
        n => Err(JustDadError::InvalidArgument(format!(
            "ID prefix '{id}' matches {n} entries; use more characters"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::{EmotionalState, FixedClock};
    use crate::storage::Database;
    use chrono::FixedOffset;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-05-15T14:00:00-04:00").unwrap()
    }

    fn store() -> JournalStore {
        JournalStore::with_database(Database::open_in_memory().unwrap())
    }

    fn args(content: &str) -> AddArgs {
        AddArgs {
            content: content.to_string(),
            ..AddArgs::default()
        }
    }

    #[test]
    fn test_build_traditional_entry() {
        let mut a = args("  Dinner with the kids #Family ");
        a.tags = vec!["#Weekend".to_string(), "  ".to_string()];
        a.title = Some("Sunday".to_string());

        let entry = build_entry(a, &now()).unwrap();
        assert_eq!(entry.content, "Dinner with the kids #Family");
        assert_eq!(entry.date, now().with_timezone(&Utc));
        assert_eq!(entry.kind, EntryKind::Traditional { title: Some("Sunday".to_string()) });
        assert_eq!(
            entry.tags.iter().cloned().collect::<Vec<_>>(),
            vec!["family", "weekend"]
        );
    }

    #[test]
    fn test_build_guided_entry() {
        let mut a = args("Court hearing moved again");
        a.emotion = Some(EmotionalState::Frustrated);
        a.intensity = Some(8);
        a.prompt = Some("What is weighing on you?".to_string());

        let entry = build_entry(a, &now()).unwrap();
        match entry.kind {
            EntryKind::Intelligent { emotion, metadata } => {
                assert_eq!(emotion, EmotionalState::Frustrated);
                assert_eq!(metadata.intensity, Some(8));
            },
            EntryKind::Traditional { .. } => panic!("expected guided entry"),
        }
    }

    #[test]
    fn test_build_rejects_empty_content() {
        let err = build_entry(args("   "), &now()).unwrap_err();
        assert!(matches!(err, JustDadError::InvalidArgument(_)));
    }

    #[test]
    fn test_parse_entry_date() {
        let day = parse_entry_date("2024-05-01", &now()).unwrap();
        assert_eq!(day.to_rfc3339(), "2024-05-01T16:00:00+00:00");

        let instant = parse_entry_date("2024-05-01T08:30:00+02:00", &now()).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-05-01T06:30:00+00:00");

        assert!(parse_entry_date("May 1st", &now()).is_err());
    }

    #[test]
    fn test_add_then_show_by_prefix() {
        let store = store();
        let clock = FixedClock(now());

        let json = add(&store, &clock, args("first entry"), OutputFormat::Json).unwrap();
        let saved: JournalEntry = serde_json::from_str(&json).unwrap();

        let shown = show(&store, &clock, &saved.id[..8], OutputFormat::Json).unwrap();
        let loaded: JournalEntry = serde_json::from_str(&shown).unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_list_by_tag() {
        let store = store();
        let clock = FixedClock(now());
        add(&store, &clock, args("school run #school"), OutputFormat::Json).unwrap();
        add(&store, &clock, args("quiet evening"), OutputFormat::Json).unwrap();

        let out = list(&store, &clock, 10, Some("#School"), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["list"], "Entries tagged #school");

        let out = list(&store, &clock, 10, None, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 2);
    }

    #[test]
    fn test_delete() {
        let store = store();
        let entry = build_entry(args("to be removed"), &now()).unwrap();
        store.save(&entry).unwrap();

        delete(&store, &entry.id, OutputFormat::Json).unwrap();
        assert!(store.get(&entry.id).unwrap().is_none());

        let err = delete(&store, &entry.id, OutputFormat::Json).unwrap_err();
        assert!(matches!(err, JustDadError::NotFound(_)));
    }

    #[test]
    fn test_ambiguous_prefix() {
        let store = store();
        for id in ["aa11", "aa22"] {
            let mut entry = build_entry(args("x"), &now()).unwrap();
            entry.id = id.to_string();
            store.save(&entry).unwrap();
        }

        let clock = FixedClock(now());
        let err = show(&store, &clock, "aa", OutputFormat::Json).unwrap_err();
        assert!(matches!(err, JustDadError::InvalidArgument(_)));
        assert!(show(&store, &clock, "aa2", OutputFormat::Json).is_ok());
    }

    #[test]
    fn test_bare_date_lists_at_local_noon() {
        colored::control::set_override(false);
        let store = store();
        let clock = FixedClock(now());
        let mut a = args("pickup after school");
        a.date = Some("2024-05-10".to_string());
        add(&store, &clock, a, OutputFormat::Json).unwrap();

        let out = list(&store, &clock, 10, None, OutputFormat::Pretty).unwrap();
        assert!(out.contains("2024-05-10 12:00"), "{out}");

        let id = store.recent(1).unwrap().remove(0).id;
        let detail = show(&store, &clock, &id, OutputFormat::Pretty).unwrap();
        assert!(detail.contains("2024-05-10 12:00 -04:00"), "{detail}");
    }
}
