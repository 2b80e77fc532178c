//! Per-day summaries, category tallies and daily calorie series.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::workouts::WorkoutRecord;

use super::Calendar;

/// Longest calorie series that can be requested (about ten years).
pub const MAX_SERIES_DAYS: u32 = 3660;

/// Totals for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    /// The day summarized.
    pub date: NaiveDate,
    /// Number of workouts on that day.
    pub count: usize,
    /// Sum of calories.
    pub total_calories: u64,
    /// Sum of minutes.
    pub total_minutes: u64,
    /// `total_calories / count`, rounded half up; 0 when there are no workouts.
    pub average_calories: u64,
}

/// Calories for one day of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// The day.
    pub date: NaiveDate,
    /// Number of workouts on that day.
    pub count: usize,
    /// Sum of calories; 0 for days without workouts.
    pub total_calories: u64,
}

/// Summarize the workouts that fall on `day` in the calendar's time zone.
///
/// Records with an unreadable date are ignored.
#[must_use]
pub fn summary_for_day<Tz: TimeZone>(
    records: &[WorkoutRecord],
    day: NaiveDate,
    calendar: &Calendar<Tz>,
) -> DaySummary {
    let on_day = records
        .iter()
        .filter(|r| calendar.record_date(r) == Some(day));

    let (count, total_calories, total_minutes) =
        on_day.fold((0_usize, 0_u64, 0_u64), |(n, cal, min), r| {
            (n + 1, cal + u64::from(r.calories), min + u64::from(r.duration_minutes))
        });

    DaySummary {
        date: day,
        count,
        total_calories,
        total_minutes,
        average_calories: rounded_average(total_calories, count),
    }
}

/// Count workouts per category label.
#[must_use]
pub fn category_tally(records: &[WorkoutRecord]) -> BTreeMap<String, usize> {
    let mut tally = BTreeMap::new();
    for record in records {
        *tally.entry(record.kind.clone()).or_default() += 1;
    }
    tally
}

/// Calorie totals for the `num_days` days ending on `ending_on`, oldest first.
///
/// Every day in the window gets an entry, even when it has no workouts.
/// Zero days gives an empty series.
///
/// # Errors
///
/// Returns `FitError::InvalidInput` when `num_days` exceeds [`MAX_SERIES_DAYS`]
/// or the window would start before the earliest representable date.
pub fn daily_series<Tz: TimeZone>(
    records: &[WorkoutRecord],
    num_days: u32,
    ending_on: NaiveDate,
    calendar: &Calendar<Tz>,
) -> Result<Vec<DailyTotal>, FitError> {
    if num_days == 0 {
        return Ok(Vec::new());
    }
    if num_days > MAX_SERIES_DAYS {
        return Err(FitError::InvalidInput(format!(
            "A series covers at most {MAX_SERIES_DAYS} days (got {num_days})"
        )));
    }

    let start = ending_on
        .checked_sub_signed(Duration::days(i64::from(num_days) - 1))
        .ok_or_else(|| {
            FitError::InvalidInput(format!("{num_days} days before {ending_on} is out of range"))
        })?;
    let mut by_date: BTreeMap<NaiveDate, (usize, u64)> = BTreeMap::new();

    for record in records {
        if let Some(date) = calendar.record_date(record) {
            if date >= start && date <= ending_on {
                let entry = by_date.entry(date).or_default();
                entry.0 += 1;
                entry.1 += u64::from(record.calories);
            }
        }
    }

    Ok(start
        .iter_days()
        .take(num_days as usize)
        .map(|date| {
            let (count, total_calories) = by_date.get(&date).copied().unwrap_or_default();
            DailyTotal {
                date,
                count,
                total_calories,
            }
        })
        .collect())
}

fn rounded_average(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    (total + count / 2) / count
}
