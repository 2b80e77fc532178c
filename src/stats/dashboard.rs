//! The combined dashboard view.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::FitError;
use crate::workouts::{sort_newest_first, WorkoutRecord};

use super::{category_tally, daily_series, summary_for_day, Calendar, DailyTotal, DaySummary};

/// Everything the dashboard shows, derived from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    /// Today's totals.
    pub today: DaySummary,
    /// Calories per day, oldest first, ending today.
    pub series: Vec<DailyTotal>,
    /// Workouts per category.
    pub categories: BTreeMap<String, usize>,
    /// Most recent workouts, newest first.
    pub recent: Vec<&'a WorkoutRecord>,
    /// Number of workouts in the snapshot.
    pub total_workouts: usize,
    /// Calories across the whole snapshot.
    pub total_calories: u64,
}

impl<'a> DashboardView<'a> {
    /// Derive the dashboard for `now`.
    ///
    /// # Errors
    ///
    /// Returns `FitError::InvalidInput` when `series_days` is out of range.
    pub fn build<Tz: TimeZone>(
        records: &'a [WorkoutRecord],
        now: DateTime<Utc>,
        calendar: &Calendar<Tz>,
        series_days: u32,
        recent_limit: usize,
    ) -> Result<Self, FitError> {
        let today = calendar.date_of(&now);

        let mut recent: Vec<_> = records.iter().collect();
        sort_newest_first(&mut recent);
        recent.truncate(recent_limit);

        Ok(Self {
            today: summary_for_day(records, today, calendar),
            series: daily_series(records, series_days, today, calendar)?,
            categories: category_tally(records),
            recent,
            total_workouts: records.len(),
            total_calories: records.iter().map(|r| u64::from(r.calories)).sum(),
        })
    }
}
