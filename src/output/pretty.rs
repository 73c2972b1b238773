use std::fmt::Display;

use chrono::TimeZone;
use colored::Colorize;

use crate::journal::{EntryKind, JournalEntry};

/// Characters of content shown per entry in list views.
const PREVIEW_CHARS: usize = 60;

/// Format a list of entries as a pretty table, with times shown in `tz`
#[must_use]
pub fn format_entries_pretty<Tz>(entries: &[JournalEntry], title: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if entries.is_empty() {
        return format!("{title} (0 entries)\n  No entries");
    }

    let mut output = format!("{} ({} entries)\n", title, entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let mut line = format!(
            "{}  {}  {}",
            short_id(&entry.id).dimmed(),
            entry
                .date
                .with_timezone(tz)
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .yellow(),
            preview(&entry.content).bold()
        );

        if let Some(emotion) = entry.kind.emotion() {
            line.push_str(&format!("  {}", emotion.as_str().magenta()));
        }

        if !entry.tags.is_empty() {
            line.push_str(&format!("  {}", format_tags(entry).cyan()));
        }

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single entry as pretty output
#[must_use]
pub fn format_entry_pretty<Tz>(entry: &JournalEntry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut lines = Vec::new();

    match &entry.kind {
        EntryKind::Intelligent { emotion, metadata } => {
            lines.push(format!("{} {}", "Guided entry".bold(), emotion.as_str().magenta()));
            if let Some(prompt) = &metadata.prompt {
                lines.push(format!("  Prompt:    {}", prompt.italic()));
            }
            if let Some(intensity) = metadata.intensity {
                lines.push(format!("  Intensity: {intensity}/10"));
            }
            if let Some(visit) = &metadata.related_visit {
                lines.push(format!("  Visit:     {visit}"));
            }
        },
        EntryKind::Traditional { title } => {
            let heading = title.as_deref().unwrap_or("Journal entry");
            lines.push(heading.bold().to_string());
        },
    }

    lines.push(format!("  ID:        {}", entry.id.dimmed()));
    lines.push(format!(
        "  Written:   {}",
        entry
            .date
            .with_timezone(tz)
            .format("%Y-%m-%d %H:%M %:z")
            .to_string()
            .yellow()
    ));
    if !entry.tags.is_empty() {
        lines.push(format!("  Tags:      {}", format_tags(entry).cyan()));
    }
    lines.push(format!("  Words:     {}", entry.word_count()));
    lines.push(String::new());
    lines.push(entry.content.clone());

    lines.join("\n")
}

fn format_tags(entry: &JournalEntry) -> String {
    entry
        .tags
        .iter()
        .map(|t| format!("#{t}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn preview(content: &str) -> String {
    let single_line = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() > PREVIEW_CHARS {
        let head: String = single_line.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{head}...")
    } else {
        single_line
    }
}
