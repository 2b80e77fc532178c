//! Terminal visualization for statistics.
//!
//! Provides ASCII charts for the calorie series and category tally.

use super::DailyTotal;

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - (label, value) pairs
/// * `max_label_width` - Maximum width for labels
/// * `bar_width` - Width of the bar portion
#[must_use]
pub fn render_bar_chart(data: &[(String, u64)], max_label_width: usize, bar_width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let label = truncate_label(label, max_label_width);
        let bar_length = scale(*value, max_value, bar_width);
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!("{label:max_label_width$} |{bar}{padding} {value}"));
    }

    lines.join("\n")
}

/// Render a sparkline (compact inline chart).
#[must_use]
pub fn render_sparkline(values: &[u64]) -> String {
    let max_value = values.iter().copied().max().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else {
                // Any non-zero day gets at least the lowest bar.
                BAR_CHARS[scale(v, max_value, 7).clamp(1, 7)]
            }
        })
        .collect()
}

/// Render a daily series as a bar chart labeled by weekday and date.
#[must_use]
pub fn render_series_chart(series: &[DailyTotal], bar_width: usize) -> String {
    let data: Vec<(String, u64)> = series
        .iter()
        .map(|d| (d.date.format("%a %b %d").to_string(), d.total_calories))
        .collect();
    render_bar_chart(&data, 10, bar_width)
}

/// `value / max * width`, in integers.
fn scale(value: u64, max: u64, width: usize) -> usize {
    let width_u64 = width as u64;
    usize::try_from(value.min(max) * width_u64 / max).unwrap_or(width)
}

fn truncate_label(label: &str, max_width: usize) -> String {
    if label.chars().count() <= max_width {
        return label.to_string();
    }
    let kept: String = label.chars().take(max_width.saturating_sub(3)).collect();
    format!("{kept}...")
}
