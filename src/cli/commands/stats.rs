//! Statistics command implementation.
//!
//! Handles the stats subcommands for journal analytics.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, StatsArgs, StatsCommands};
use crate::config::JournalConfig;
use crate::error::JustDadError;
use crate::features::stats::{
    daily_counts, render_bar_chart, render_emotion_trend, render_sparkline, JournalStatistics,
    StreakInfo, TagMetrics, MAX_TOP_TAGS,
};
use crate::journal::{Clock, EntrySource};
use crate::output::to_json;

/// Longest window `stats trends` accepts, about ten years.
pub const MAX_TREND_DAYS: usize = 3660;

/// Execute stats subcommands.
///
/// Days are grouped in the clock's timezone, unless `--now` pins a fixed
/// offset.
///
/// # Errors
///
/// Returns an error if entries cannot be loaded or output formatting fails.
pub fn stats<C: Clock>(
    source: &dyn EntrySource,
    clock: &C,
    config: &JournalConfig,
    args: &StatsArgs,
    format: OutputFormat,
) -> Result<String, JustDadError> {
    match args.now {
        Some(now) => report(source, &now, config, args.command, format),
        None => report(source, &clock.now(), config, args.command, format),
    }
}

fn report<Tz: TimeZone>(
    source: &dyn EntrySource,
    now: &DateTime<Tz>,
    config: &JournalConfig,
    command: Option<StatsCommands>,
    format: OutputFormat,
) -> Result<String, JustDadError> {
    let week_start = config.week_start.weekday();

    match command {
        Some(StatsCommands::Trends { days }) => {
            render_trends(source, now, days.unwrap_or(config.trend_days), config, format)
        },
        cmd => {
            let entries = source.all_entries()?;
            let statistics = JournalStatistics::compute(&entries, now, week_start);

            match cmd {
                Some(StatsCommands::Tags) => {
                    let tags: Vec<TagMetrics> = TagMetrics::calculate_all(&entries)
                        .into_iter()
                        .take(config.top_tags.min(MAX_TOP_TAGS))
                        .collect();
                    render_tags(&statistics, &tags, format)
                },
                Some(StatsCommands::Streak) => render_streak(&statistics, now, format),
                _ => render_summary(&statistics, format),
            }
        },
    }
}

/// Render the summary dashboard.
fn render_summary(statistics: &JournalStatistics, format: OutputFormat) -> Result<String, JustDadError> {
    match format {
        OutputFormat::Json => to_json(statistics),
        OutputFormat::Pretty => {
            let mut output = Vec::new();

            output.push("📓 JOURNAL".bold().to_string());
            output.push("─".repeat(50));
            output.push(format!(
                "  This week: {}  This month: {}  All time: {}",
                statistics.entries_this_week.to_string().green(),
                statistics.entries_this_month.to_string().green(),
                statistics.total_entries
            ));
            output.push(format!(
                "  Average length: {:.1} words",
                statistics.average_words_per_entry
            ));
            output.push(String::new());

            output.push("🔥 STREAK".bold().to_string());
            output.push("─".repeat(50));
            output.push(format!(
                "  Current: {}  Longest: {} days",
                streak_display(statistics.current_streak),
                statistics.longest_streak
            ));
            output.push(String::new());

            output.push("🏷  TOP TAGS".bold().to_string());
            output.push("─".repeat(50));
            if statistics.most_used_tags.is_empty() {
                output.push(format!("  {}", "No tags yet".dimmed()));
            } else {
                let tags: Vec<String> = statistics
                    .most_used_tags
                    .iter()
                    .map(|t| format!("#{t}"))
                    .collect();
                output.push(format!("  {}", tags.join("  ").cyan()));
            }

            if let Some(latest) = statistics.emotion_trends.last() {
                output.push(String::new());
                output.push("💭 LATEST MOOD".bold().to_string());
                output.push("─".repeat(50));
                output.push(format!(
                    "  {} on {}",
                    latest.emotion.as_str().magenta(),
                    latest.day.format("%b %d")
                ));
            }

            Ok(output.join("\n"))
        },
    }
}

/// Render tag frequencies.
fn render_tags(
    statistics: &JournalStatistics,
    tags: &[TagMetrics],
    format: OutputFormat,
) -> Result<String, JustDadError> {
    match format {
        OutputFormat::Json => to_json(&json!({
            "most_used_tags": statistics.most_used_tags,
            "tags": tags,
        })),
        OutputFormat::Pretty => {
            if tags.is_empty() {
                return Ok("No tags yet".to_string());
            }

            let data: Vec<(String, usize)> = tags
                .iter()
                .map(|t| (format!("#{}", t.name), t.count))
                .collect();

            let mut output = vec!["🏷  TAGS".bold().to_string(), "─".repeat(50)];
            output.push(render_bar_chart(&data, 16, 30));
            Ok(output.join("\n"))
        },
    }
}

/// Render daily entry counts and the mood trend over the last `days` days.
fn render_trends<Tz: TimeZone>(
    source: &dyn EntrySource,
    now: &DateTime<Tz>,
    days: usize,
    config: &JournalConfig,
    format: OutputFormat,
) -> Result<String, JustDadError> {
    if days == 0 {
        return Err(JustDadError::InvalidArgument(
            "--days must be at least 1".to_string(),
        ));
    }
    if days > MAX_TREND_DAYS {
        return Err(JustDadError::InvalidArgument(format!(
            "--days {days} is out of range (at most {MAX_TREND_DAYS})"
        )));
    }

    let out_of_range = || JustDadError::InvalidArgument(format!("--days {days} is out of range"));
    let today = now.date_naive();
    let first_day = i64::try_from(days - 1)
        .ok()
        .and_then(Duration::try_days)
        .and_then(|back| today.checked_sub_signed(back))
        .ok_or_else(out_of_range)?;
    let tomorrow = today.succ_opt().ok_or_else(out_of_range)?;

    let start = local_midnight(first_day, now)?;
    let end = local_midnight(tomorrow, now)?;
    let entries = source.entries_between(start, end)?;

    let counts = daily_counts(&entries, now, days);
    let window = JournalStatistics::compute(&entries, now, config.week_start.weekday());

    match format {
        OutputFormat::Json => to_json(&json!({
            "days": days,
            "daily": counts
                .iter()
                .map(|(day, count)| json!({ "day": day, "count": count }))
                .collect::<Vec<_>>(),
            "emotion_trends": window.emotion_trends,
        })),
        OutputFormat::Pretty => {
            let values: Vec<usize> = counts.iter().map(|(_, c)| *c).collect();
            let mut output = Vec::new();

            output.push(format!("📈 LAST {days} DAYS").bold().to_string());
            output.push("─".repeat(50));
            output.push(format!("  Entries: {}", render_sparkline(&values)));
            output.push(format!("  Total:   {}", entries.len()));
            output.push(String::new());

            output.push("💭 MOOD BY DAY".bold().to_string());
            output.push("─".repeat(50));
            if window.emotion_trends.is_empty() {
                output.push(format!("  {}", "No guided entries in this period".dimmed()));
            } else {
                for line in render_emotion_trend(&window.emotion_trends).lines() {
                    output.push(format!("  {line}"));
                }
            }

            Ok(output.join("\n"))
        },
    }
}

/// Render streak details.
fn render_streak<Tz: TimeZone>(
    statistics: &JournalStatistics,
    now: &DateTime<Tz>,
    format: OutputFormat,
) -> Result<String, JustDadError> {
    let streak = StreakInfo {
        current: statistics.current_streak,
        longest: statistics.longest_streak,
        last_entry_day: statistics.last_entry_day,
    };
    let days_since = streak.days_since_last_entry(now.date_naive());

    match format {
        OutputFormat::Json => to_json(&json!({
            "current_streak": streak.current,
            "longest_streak": streak.longest,
            "last_entry_day": streak.last_entry_day,
            "days_since_last_entry": days_since,
        })),
        OutputFormat::Pretty => {
            let mut output = vec![
                "🔥 STREAK".bold().to_string(),
                "─".repeat(40),
                format!("Current:  {}", streak_display(streak.current)),
                format!("Longest:  {} days", streak.longest),
            ];
            match streak.last_entry_day {
                Some(day) => output.push(format!(
                    "Last entry: {} ({} days ago)",
                    day.format("%b %d, %Y"),
                    days_since
                )),
                None => output.push("No entries yet".dimmed().to_string()),
            }
            Ok(output.join("\n"))
        },
    }
}

fn streak_display(days: usize) -> String {
    if days > 0 {
        format!("{days} days").green().to_string()
    } else {
        "0 days".dimmed().to_string()
    }
}

/// Start of `day` in `now`'s timezone. Where midnight falls in a DST gap the
/// day starts at the first valid hour.
fn local_midnight<Tz: TimeZone>(
    day: NaiveDate,
    now: &DateTime<Tz>,
) -> Result<DateTime<Utc>, JustDadError> {
    let tz = now.timezone();
    (0..3)
        .filter_map(|hour| day.and_hms_opt(hour, 0, 0))
        .find_map(|start| tz.from_local_datetime(&start).earliest())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| JustDadError::InvalidArgument(format!("Cannot resolve midnight on {day}")))
}
