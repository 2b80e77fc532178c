//! Calendar conventions for aggregation.
//!
//! All day, week and month comparisons use local calendar dates, never
//! rolling 24-hour windows. A [`Calendar`] pins down which time zone is
//! "local" and which weekday a week starts on.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::workouts::WorkoutRecord;

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// ISO weeks.
    #[default]
    Monday,
    /// US-style weeks.
    Sunday,
    /// Weeks starting Saturday.
    Saturday,
}

impl WeekStart {
    /// The corresponding chrono weekday.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
            Self::Saturday => Weekday::Sat,
        }
    }
}

/// A time zone plus week convention.
#[derive(Debug, Clone)]
pub struct Calendar<Tz: TimeZone> {
    tz: Tz,
    week_start: WeekStart,
}

impl Calendar<Local> {
    /// The system time zone.
    #[must_use]
    pub const fn local(week_start: WeekStart) -> Self {
        Self::new(Local, week_start)
    }
}

impl Calendar<Utc> {
    /// UTC with Monday weeks.
    #[must_use]
    pub const fn utc() -> Self {
        Self::new(Utc, WeekStart::Monday)
    }
}

impl<Tz: TimeZone> Calendar<Tz> {
    /// Create a calendar for `tz`.
    #[must_use]
    pub const fn new(tz: Tz, week_start: WeekStart) -> Self {
        Self { tz, week_start }
    }

    /// The configured week start.
    #[must_use]
    pub const fn week_start(&self) -> WeekStart {
        self.week_start
    }

    /// The local calendar date of an instant.
    #[must_use]
    pub fn date_of(&self, at: &DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.tz).date_naive()
    }

    /// The local calendar date of a workout, if its date parses.
    #[must_use]
    pub fn record_date(&self, record: &WorkoutRecord) -> Option<NaiveDate> {
        record.local_date(&self.tz)
    }

    /// The first day of the week containing `day`.
    #[must_use]
    pub fn start_of_week(&self, day: NaiveDate) -> NaiveDate {
        let start = self.week_start.weekday().num_days_from_monday();
        let current = day.weekday().num_days_from_monday();
        let offset = (current + 7 - start) % 7;
        day - Duration::days(i64::from(offset))
    }

    /// Whether two dates fall in the same calendar week.
    #[must_use]
    pub fn same_week(&self, a: NaiveDate, b: NaiveDate) -> bool {
        self.start_of_week(a) == self.start_of_week(b)
    }

    /// Whether two dates fall in the same calendar month.
    #[must_use]
    pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
        a.year() == b.year() && a.month() == b.month()
    }
}
