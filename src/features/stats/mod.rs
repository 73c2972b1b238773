//! Journal statistics.
//!
//! Aggregates journal entries into:
//! - Weekly, monthly and total entry counts
//! - Average words per entry
//! - Most-used tags
//! - Per-day dominant emotion
//! - Longest and current writing streaks

pub mod metrics;
pub mod visualization;

pub use metrics::{daily_counts, EmotionTrend, JournalStatistics, StreakInfo, TagMetrics, MAX_TOP_TAGS};
pub use visualization::{render_bar_chart, render_emotion_trend, render_sparkline};
