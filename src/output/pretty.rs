use std::collections::BTreeMap;

use chrono::Local;
use colored::Colorize;

use crate::session::UserProfile;
use crate::stats::{
    render_bar_chart, render_series_chart, render_sparkline, DailyTotal, DashboardView,
    DaySummary, RecencyBuckets,
};
use crate::workouts::{ExerciseDetail, SyncState, WorkoutRecord};

/// Local date and time of a workout, or a placeholder for unreadable dates.
fn when(workout: &WorkoutRecord) -> String {
    workout.occurred_at().map_or_else(
        || "(no date)".to_string(),
        |at| at.with_timezone(&Local).format("%b %d, %Y %H:%M").to_string(),
    )
}

/// One-line summary of a workout
fn workout_line(workout: &WorkoutRecord) -> String {
    let mut line = format!(
        "{}  {}  {} min  {} kcal",
        workout.kind.bold(),
        when(workout).dimmed(),
        workout.duration_minutes,
        workout.calories.to_string().green()
    );

    if !workout.description.is_empty() {
        line.push_str(&format!("  {}", workout.description));
    }
    line.push_str(&format!("  {}", format!("[{}]", workout.id).dimmed()));
    line
}

/// Format a list of workouts as a pretty table
pub fn format_workouts_pretty(workouts: &[&WorkoutRecord], title: &str) -> String {
    if workouts.is_empty() {
        return format!("{title} (0 items)\n  No workouts");
    }

    let mut output = format!("{} ({} items)\n", title, workouts.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for workout in workouts {
        output.push_str(&workout_line(workout));
        output.push('\n');
    }

    output
}

/// Format a single workout as pretty output
pub fn format_workout_pretty(workout: &WorkoutRecord) -> String {
    let mut output = format!("{}\n", workout.kind.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), workout.id));
    output.push_str(&format!("  {}: {}\n", "Date".dimmed(), when(workout)));
    output.push_str(&format!("  {}: {} min\n", "Duration".dimmed(), workout.duration_minutes));
    output.push_str(&format!("  {}: {} kcal\n", "Calories".dimmed(), workout.calories));

    if !workout.description.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Description".dimmed(), workout.description));
    }

    if let Some(detail) = ExerciseDetail::parse(&workout.description).filter(ExerciseDetail::is_structured) {
        output.push_str(&format!("  {}: {}\n", "Exercise".dimmed(), detail.name));
        if let (Some(sets), Some(reps)) = (detail.sets, detail.reps) {
            output.push_str(&format!("  {}: {} x {}\n", "Sets x reps".dimmed(), sets, reps));
        }
        if let Some(load) = &detail.load {
            output.push_str(&format!("  {}: {}\n", "Load".dimmed(), load));
        }
        if let Some(minutes) = detail.minutes {
            output.push_str(&format!("  {}: {} min\n", "Working time".dimmed(), minutes));
        }
    }

    output
}

/// Format the result of a store mutation
pub fn format_mutation_pretty(action: &str, workout: &WorkoutRecord, sync: &SyncState) -> String {
    let mut output = format!("{} {}: {}", "✓".green(), action, workout_line(workout));
    if let SyncState::Unsynced { reason } = sync {
        output.push_str(&format!(
            "\n{}: change kept in memory only ({reason})",
            "warning".yellow().bold()
        ));
    }
    output
}

/// Format a day summary as pretty output
pub fn format_summary_pretty(summary: &DaySummary) -> String {
    let mut output = format!("{}\n", summary.date.format("%A, %B %-d, %Y").to_string().bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');
    output.push_str(&format!("  Workouts:      {}\n", summary.count.to_string().cyan()));
    output.push_str(&format!(
        "  Calories:      {}\n",
        summary.total_calories.to_string().green()
    ));
    output.push_str(&format!("  Minutes:       {}\n", summary.total_minutes));
    output.push_str(&format!("  Avg/workout:   {} kcal\n", summary.average_calories));
    output
}

/// Format a category tally as a bar chart
pub fn format_tally_pretty(tally: &BTreeMap<String, usize>) -> String {
    if tally.is_empty() {
        return "Categories (0)\n  No workouts".to_string();
    }

    let mut data: Vec<(String, u64)> = tally
        .iter()
        .map(|(kind, count)| (kind.clone(), *count as u64))
        .collect();
    // Largest first; ties stay alphabetical.
    data.sort_by(|a, b| b.1.cmp(&a.1));

    format!(
        "Categories ({})\n{}\n{}",
        tally.len(),
        "─".repeat(40),
        render_bar_chart(&data, 12, 24)
    )
}

/// Format a daily calorie series
pub fn format_series_pretty(series: &[DailyTotal]) -> String {
    let values: Vec<u64> = series.iter().map(|d| d.total_calories).collect();
    let total: u64 = values.iter().sum();

    format!(
        "Calories, last {} days  {}  total {}\n{}\n{}",
        series.len(),
        render_sparkline(&values).cyan(),
        total.to_string().green(),
        "─".repeat(40),
        render_series_chart(series, 24)
    )
}

/// Format recency buckets, one section per non-empty group
pub fn format_buckets_pretty(buckets: &RecencyBuckets<'_>) -> String {
    let sections = [
        ("Today", &buckets.today),
        ("This Week", &buckets.this_week),
        ("This Month", &buckets.this_month),
        ("Older", &buckets.older),
        ("Undated", &buckets.undated),
    ];

    let rendered: Vec<String> = sections
        .iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(title, items)| format_workouts_pretty(items, title))
        .collect();

    if rendered.is_empty() {
        return "No workouts".to_string();
    }
    rendered.join("\n")
}

/// Format the full dashboard
pub fn format_dashboard_pretty(view: &DashboardView<'_>) -> String {
    let mut output = Vec::new();

    output.push("╔════════════════════════════════════════════════════════════════╗".to_string());
    output.push("║                       WORKOUT DASHBOARD                        ║".to_string());
    output.push("╚════════════════════════════════════════════════════════════════╝".to_string());
    output.push(String::new());

    output.push("TODAY".bold().to_string());
    output.push("─".repeat(50));
    output.push(format!(
        "  Calories: {}  Workouts: {}  Avg/workout: {} kcal",
        view.today.total_calories.to_string().green(),
        view.today.count.to_string().cyan(),
        view.today.average_calories
    ));
    output.push(String::new());

    output.push("THIS WEEK".bold().to_string());
    output.push("─".repeat(50));
    output.push(format_series_pretty(&view.series));
    output.push(String::new());

    output.push("BY CATEGORY".bold().to_string());
    output.push("─".repeat(50));
    output.push(format_tally_pretty(&view.categories));
    output.push(String::new());

    output.push("RECENT".bold().to_string());
    output.push("─".repeat(50));
    if view.recent.is_empty() {
        output.push("  No workouts yet".dimmed().to_string());
    }
    for workout in &view.recent {
        output.push(format!("  {}", workout_line(workout)));
    }
    output.push(String::new());
    output.push(format!(
        "  {} workouts, {} kcal all time",
        view.total_workouts, view.total_calories
    ));

    output.join("\n")
}

/// Format a user profile
pub fn format_profile_pretty(profile: &UserProfile) -> String {
    let mut output = format!("{}\n", profile.name.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), profile.id));
    output.push_str(&format!("  {}: {}\n", "Email".dimmed(), profile.email));
    if let Some(avatar) = &profile.avatar {
        output.push_str(&format!("  {}: {}\n", "Avatar".dimmed(), avatar));
    }
    output
}
