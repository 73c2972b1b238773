//! Terminal visualization for statistics.
//!
//! Provides ASCII charts for the `stats` command.

use crate::journal::EmotionalState;

use super::metrics::EmotionTrend;

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - Vec of (label, value) pairs
/// * `max_label_width` - Maximum width for labels
/// * `bar_width` - Width of the bar portion
#[must_use]
pub fn render_bar_chart(data: &[(String, usize)], max_label_width: usize, bar_width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let truncated_label = if label.chars().count() > max_label_width && max_label_width > 3 {
            let head: String = label.chars().take(max_label_width - 3).collect();
            format!("{head}...")
        } else {
            format!("{label:max_label_width$}")
        };

        let bar_length = (*value * bar_width) / max_value;
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!("{truncated_label} |{bar}{padding} {value}"));
    }

    lines.join("\n")
}

/// Render a sparkline (compact inline chart).
#[must_use]
pub fn render_sparkline(values: &[usize]) -> String {
    if values.is_empty() {
        return String::new();
    }

    let max_value = values.iter().copied().max().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else {
                // Non-zero days always show at least the lowest bar.
                BAR_CHARS[((v * 7) / max_value).clamp(1, 7)]
            }
        })
        .collect()
}

/// Single-character marker for an emotional state.
#[must_use]
pub const fn emotion_glyph(emotion: EmotionalState) -> char {
    match emotion {
        EmotionalState::Overwhelmed => '!',
        EmotionalState::Sad => 'v',
        EmotionalState::Anxious => '~',
        EmotionalState::Frustrated => 'x',
        EmotionalState::Neutral => '-',
        EmotionalState::Calm => 'o',
        EmotionalState::Hopeful => '^',
        EmotionalState::Happy => '+',
        EmotionalState::Grateful => '*',
    }
}

/// Render the emotion trend as one line per day with a rank bar.
#[must_use]
pub fn render_emotion_trend(trends: &[EmotionTrend]) -> String {
    trends
        .iter()
        .map(|t| {
            let weight = usize::try_from(t.weight).unwrap_or_default();
            format!(
                "{} {} {:<11} {}",
                t.day.format("%a %b %d"),
                emotion_glyph(t.emotion),
                t.emotion.as_str(),
                FULL_BLOCK.to_string().repeat(weight)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
