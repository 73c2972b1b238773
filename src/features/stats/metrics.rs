//! Metric calculations for journal statistics.
//!
//! Everything here is a pure function of the entries and a reference
//! instant. Calendar days are taken in the reference instant's timezone.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::journal::{EmotionalState, EntryKind, JournalEntry};

/// Maximum number of tags reported in [`JournalStatistics::most_used_tags`].
pub const MAX_TOP_TAGS: usize = 5;

/// Dominant emotion for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionTrend {
    /// Calendar day.
    pub day: NaiveDate,
    /// Most frequent emotion among the day's intelligent entries.
    pub emotion: EmotionalState,
    /// The dominant emotion's rank, not an occurrence count.
    pub weight: u32,
}

/// Aggregate statistics over a set of journal entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalStatistics {
    /// Total number of entries
    pub total_entries: usize,
    /// Entries in the current week (clipped to the current month)
    pub entries_this_week: usize,
    /// Entries in the current calendar month
    pub entries_this_month: usize,
    /// Mean whitespace-delimited word count
    pub average_words_per_entry: f64,
    /// Up to five tags, most frequent first
    pub most_used_tags: Vec<String>,
    /// One element per day with an intelligent entry, oldest first
    pub emotion_trends: Vec<EmotionTrend>,
    /// Longest run of consecutive entry-days
    pub longest_streak: usize,
    /// Run of consecutive entry-days starting today
    pub current_streak: usize,
    /// Most recent entry-day
    pub last_entry_day: Option<NaiveDate>,
}

impl JournalStatistics {
    /// Compute statistics for `entries` as seen from `now`.
    ///
    /// `week_start` selects the first day of the week for the weekly count.
    /// Entries may be given in any order. Never fails; an empty slice yields
    /// all-zero statistics.
    #[must_use]
    pub fn compute<Tz: TimeZone>(
        entries: &[JournalEntry],
        now: &DateTime<Tz>,
        week_start: Weekday,
    ) -> Self {
        let tz = now.timezone();
        let today = now.date_naive();
        let days: Vec<NaiveDate> = entries
            .iter()
            .map(|entry| entry.date.with_timezone(&tz).date_naive())
            .collect();

        let window = CalendarWindow::new(today, week_start);
        let entries_this_month = days.iter().filter(|d| window.in_month(**d)).count();
        let entries_this_week = days.iter().filter(|d| window.in_week(**d)).count();

        let average_words_per_entry = if entries.is_empty() {
            0.0
        } else {
            let words: usize = entries.iter().map(JournalEntry::word_count).sum();
            words as f64 / entries.len() as f64
        };

        let streak = StreakInfo::calculate(&days, today);

        debug!(
            entries = entries.len(),
            longest = streak.longest,
            current = streak.current,
            "computed journal statistics"
        );

        Self {
            total_entries: entries.len(),
            entries_this_week,
            entries_this_month,
            average_words_per_entry,
            most_used_tags: TagMetrics::calculate_all(entries)
                .into_iter()
                .take(MAX_TOP_TAGS)
                .map(|t| t.name)
                .collect(),
            emotion_trends: emotion_trends(entries, &days),
            longest_streak: streak.longest,
            current_streak: streak.current,
            last_entry_day: streak.last_entry_day,
        }
    }
}

/// Week and month boundaries around a reference day.
struct CalendarWindow {
    today: NaiveDate,
    week_begin: NaiveDate,
    week_end: NaiveDate,
}

impl CalendarWindow {
    fn new(today: NaiveDate, week_start: Weekday) -> Self {
        let offset = (7 + today.weekday().num_days_from_monday()
            - week_start.num_days_from_monday())
            % 7;
        let week_begin = today - Duration::days(i64::from(offset));
        Self {
            today,
            week_begin,
            week_end: week_begin + Duration::days(7),
        }
    }

    fn in_month(&self, day: NaiveDate) -> bool {
        day.year() == self.today.year() && day.month() == self.today.month()
    }

    // Clipped to the month so the weekly count never exceeds the monthly one.
    fn in_week(&self, day: NaiveDate) -> bool {
        day >= self.week_begin && day < self.week_end && self.in_month(day)
    }
}

/// Streak information.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakInfo {
    /// Run of consecutive entry-days that begins today
    pub current: usize,
    /// Longest run ever
    pub longest: usize,
    /// Most recent entry-day
    pub last_entry_day: Option<NaiveDate>,
}

impl StreakInfo {
    /// Calculate streaks from entry days (duplicates and any order allowed).
    ///
    /// Days are walked newest first. The current streak only starts if the
    /// newest day is `today`, and it stops at the first gap; a run ending
    /// yesterday therefore has a current streak of zero.
    #[must_use]
    pub fn calculate(days: &[NaiveDate], today: NaiveDate) -> Self {
        let mut sorted = days.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        let Some(&newest) = sorted.first() else {
            return Self::default();
        };

        let mut longest = 0;
        let mut run = 1;
        let mut current = usize::from(newest == today);
        let mut in_newest_run = true;

        for pair in sorted.windows(2) {
            if (pair[0] - pair[1]).num_days() == 1 {
                run += 1;
                if in_newest_run && current > 0 {
                    current += 1;
                }
            } else {
                longest = longest.max(run);
                run = 1;
                in_newest_run = false;
            }
        }

        Self {
            current,
            longest: longest.max(run),
            last_entry_day: Some(newest),
        }
    }

    /// Days between the last entry-day and `today`, zero if none or in the future.
    #[must_use]
    pub fn days_since_last_entry(&self, today: NaiveDate) -> usize {
        self.last_entry_day
            .map(|d| usize::try_from((today - d).num_days().max(0)).unwrap_or_default())
            .unwrap_or(0)
    }
}

/// Tag-level metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMetrics {
    /// Tag name
    pub name: String,
    /// Number of entries carrying the tag
    pub count: usize,
}

impl TagMetrics {
    /// Count every tag, most frequent first. Ties keep first-seen order.
    #[must_use]
    pub fn calculate_all(entries: &[JournalEntry]) -> Vec<Self> {
        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut tags: Vec<Self> = Vec::new();

        for tag in entries.iter().flat_map(|e| e.tags.iter()) {
            if let Some(&i) = position.get(tag.as_str()) {
                tags[i].count += 1;
            } else {
                position.insert(tag, tags.len());
                tags.push(Self {
                    name: tag.clone(),
                    count: 1,
                });
            }
        }

        // Stable sort preserves first-seen order among equal counts.
        tags.sort_by(|a, b| b.count.cmp(&a.count));
        tags
    }
}

/// Dominant emotion per day, for intelligent entries only.
///
/// `days[i]` must be the calendar day of `entries[i]`. A tie on count goes
/// to the emotion seen first in input order.
fn emotion_trends(entries: &[JournalEntry], days: &[NaiveDate]) -> Vec<EmotionTrend> {
    let mut by_day: BTreeMap<NaiveDate, Vec<(EmotionalState, usize)>> = BTreeMap::new();

    for (entry, day) in entries.iter().zip(days) {
        let emotion = match &entry.kind {
            EntryKind::Intelligent { emotion, .. } => *emotion,
            EntryKind::Traditional { .. } => continue,
        };

        let tally = by_day.entry(*day).or_default();
        if let Some(slot) = tally.iter_mut().find(|(e, _)| *e == emotion) {
            slot.1 += 1;
        } else {
            tally.push((emotion, 1));
        }
    }

    by_day
        .into_iter()
        .filter_map(|(day, tally)| {
            let mut best: Option<(EmotionalState, usize)> = None;
            for (emotion, count) in tally {
                if best.map_or(true, |(_, top)| count > top) {
                    best = Some((emotion, count));
                }
            }
            best.map(|(emotion, _)| EmotionTrend {
                day,
                emotion,
                weight: emotion.rank(),
            })
        })
        .collect()
}

/// Entries per day for the `days` days ending on `now`'s day, oldest first.
#[must_use]
pub fn daily_counts<Tz: TimeZone>(
    entries: &[JournalEntry],
    now: &DateTime<Tz>,
    days: usize,
) -> Vec<(NaiveDate, usize)> {
    let tz = now.timezone();
    let today = now.date_naive();

    let mut by_date: HashMap<NaiveDate, usize> = HashMap::new();
    for entry in entries {
        *by_date
            .entry(entry.date.with_timezone(&tz).date_naive())
            .or_default() += 1;
    }

    // The window never reaches back past the earliest representable date.
    let representable = usize::try_from(today.signed_duration_since(NaiveDate::MIN).num_days())
        .map_or(usize::MAX, |span| span.saturating_add(1));

    (0..days.min(representable))
        .rev()
        .filter_map(|offset| {
            let back = Duration::try_days(i64::try_from(offset).ok()?)?;
            let day = today.checked_sub_signed(back)?;
            Some((day, by_date.get(&day).copied().unwrap_or(0)))
        })
        .collect()
}
