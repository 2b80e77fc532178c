//! Workout aggregation.
//!
//! Pure, stateless views over a snapshot of workouts:
//! - Per-day summaries (count, calories, average)
//! - Per-category tallies
//! - Daily calorie series
//! - Recency buckets (today, this week, this month, older)
//!
//! Day, week and month boundaries are local calendar boundaries defined by
//! a [`Calendar`]; weeks start on Monday unless configured otherwise.

mod calendar;
mod dashboard;
mod recency;
mod summary;
pub mod visualization;

pub use calendar::{Calendar, WeekStart};
pub use dashboard::DashboardView;
pub use recency::{bucket_by_recency, recency_of, Recency, RecencyBuckets};
pub use summary::{
    category_tally, daily_series, summary_for_day, DailyTotal, DaySummary, MAX_SERIES_DAYS,
};
pub use visualization::{render_bar_chart, render_series_chart, render_sparkline};
