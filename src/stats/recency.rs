//! Grouping workouts by how recent they are.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::workouts::{sort_newest_first, WorkoutRecord};

use super::Calendar;

/// Which recency group a workout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recency {
    /// Same calendar day as now.
    Today,
    /// Current calendar week, not today.
    ThisWeek,
    /// Current calendar month, not this week.
    ThisMonth,
    /// Anything else with a readable date.
    Older,
    /// The date could not be read.
    Undated,
}

/// A disjoint partition of workouts by recency, each group newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecencyBuckets<'a> {
    /// Same calendar day as now.
    pub today: Vec<&'a WorkoutRecord>,
    /// Current calendar week, not today.
    pub this_week: Vec<&'a WorkoutRecord>,
    /// Current calendar month, not this week.
    pub this_month: Vec<&'a WorkoutRecord>,
    /// Everything else with a readable date.
    pub older: Vec<&'a WorkoutRecord>,
    /// Records whose date is missing or malformed. They belong to none of the
    /// four recency groups.
    pub undated: Vec<&'a WorkoutRecord>,
}

impl RecencyBuckets<'_> {
    /// Total number of workouts across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.today.len()
            + self.this_week.len()
            + self.this_month.len()
            + self.older.len()
            + self.undated.len()
    }

    /// Whether every group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify one workout relative to `now`.
#[must_use]
pub fn recency_of<Tz: TimeZone>(
    record: &WorkoutRecord,
    now: &DateTime<Utc>,
    calendar: &Calendar<Tz>,
) -> Recency {
    let Some(date) = calendar.record_date(record) else {
        return Recency::Undated;
    };
    let today = calendar.date_of(now);

    if date == today {
        Recency::Today
    } else if calendar.same_week(date, today) {
        Recency::ThisWeek
    } else if Calendar::<Tz>::same_month(date, today) {
        Recency::ThisMonth
    } else {
        Recency::Older
    }
}

/// Partition `records` into today / this week / this month / older relative to `now`.
#[must_use]
pub fn bucket_by_recency<'a, Tz: TimeZone>(
    records: &'a [WorkoutRecord],
    now: DateTime<Utc>,
    calendar: &Calendar<Tz>,
) -> RecencyBuckets<'a> {
    let mut buckets = RecencyBuckets::default();

    for record in records {
        let bucket = match recency_of(record, &now, calendar) {
            Recency::Today => &mut buckets.today,
            Recency::ThisWeek => &mut buckets.this_week,
            Recency::ThisMonth => &mut buckets.this_month,
            Recency::Older => &mut buckets.older,
            Recency::Undated => &mut buckets.undated,
        };
        bucket.push(record);
    }

    for bucket in [
        &mut buckets.today,
        &mut buckets.this_week,
        &mut buckets.this_month,
        &mut buckets.older,
    ] {
        sort_newest_first(bucket);
    }

    buckets
}
