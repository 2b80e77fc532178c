//! Workout data types.
//!
//! The serialized layout matches what the web app kept in local storage:
//! `{"id", "type", "description", "duration", "calories", "date"}`.

use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// One logged exercise session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    /// Stable identifier, unique within a store.
    pub id: String,
    /// Category label such as "Legs" or "Cardio".
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-text detail.
    #[serde(default)]
    pub description: String,
    /// Duration in minutes.
    #[serde(rename = "duration", alias = "durationMinutes")]
    pub duration_minutes: u32,
    /// Calories burned.
    pub calories: u32,
    /// ISO-8601 timestamp of when the workout happened.
    ///
    /// Kept as text so that a malformed value survives a load/save cycle.
    #[serde(default)]
    pub date: String,
}

impl WorkoutRecord {
    /// The parsed timestamp, or `None` if `date` is missing or malformed.
    #[must_use]
    pub fn occurred_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(self.date.trim())
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// The calendar date of the workout in `tz`.
    #[must_use]
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.occurred_at().map(|dt| dt.with_timezone(tz).date_naive())
    }

    /// Case-insensitive substring match on type or description.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.kind.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

/// Render a timestamp the way records store it (`2025-04-15T18:30:00.000Z`).
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Sort newest first; records without a readable date go last.
pub fn sort_newest_first(records: &mut [&WorkoutRecord]) {
    records.sort_by_key(|r| std::cmp::Reverse(r.occurred_at()));
}

/// Fields for a workout that has not been added yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    /// Category label.
    pub kind: String,
    /// Free-text detail.
    pub description: String,
    /// Duration in minutes.
    pub duration_minutes: u32,
    /// Calories burned.
    pub calories: u32,
    /// When it happened; the store uses the current time if absent.
    pub date: Option<DateTime<Utc>>,
}

impl NewWorkout {
    /// Create a workout with no description, dated at insertion time.
    #[must_use]
    pub fn new(kind: impl Into<String>, duration_minutes: u32, calories: u32) -> Self {
        Self {
            kind: kind.into(),
            description: String::new(),
            duration_minutes,
            calories,
            date: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the workout timestamp.
    #[must_use]
    pub const fn at(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Check the fields a form would require before calling the store.
    ///
    /// # Errors
    ///
    /// Returns `FitError::InvalidInput` for an empty type or a zero duration/calorie count.
    pub fn validate(&self) -> Result<(), FitError> {
        if self.kind.trim().is_empty() {
            return Err(FitError::InvalidInput("Workout type is required".to_string()));
        }
        validate_positive("Duration", self.duration_minutes)?;
        validate_positive("Calories", self.calories)
    }
}

/// A partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutPatch {
    /// New category label.
    pub kind: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New duration in minutes.
    pub duration_minutes: Option<u32>,
    /// New calorie count.
    pub calories: Option<u32>,
    /// New timestamp.
    pub date: Option<DateTime<Utc>>,
}

impl WorkoutPatch {
    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.description.is_none()
            && self.duration_minutes.is_none()
            && self.calories.is_none()
            && self.date.is_none()
    }

    /// Merge the patch into `record`. The id is never touched.
    pub fn apply(&self, record: &mut WorkoutRecord) {
        if let Some(kind) = &self.kind {
            record.kind.clone_from(kind);
        }
        if let Some(description) = &self.description {
            record.description.clone_from(description);
        }
        if let Some(duration) = self.duration_minutes {
            record.duration_minutes = duration;
        }
        if let Some(calories) = self.calories {
            record.calories = calories;
        }
        if let Some(date) = self.date {
            record.date = format_timestamp(date);
        }
    }

    /// Check that provided fields would pass [`NewWorkout::validate`].
    ///
    /// # Errors
    ///
    /// Returns `FitError::InvalidInput` for an empty type or a zero duration/calorie count.
    pub fn validate(&self) -> Result<(), FitError> {
        if self.kind.as_deref().is_some_and(|k| k.trim().is_empty()) {
            return Err(FitError::InvalidInput("Workout type is required".to_string()));
        }
        if let Some(duration) = self.duration_minutes {
            validate_positive("Duration", duration)?;
        }
        if let Some(calories) = self.calories {
            validate_positive("Calories", calories)?;
        }
        Ok(())
    }
}

fn validate_positive(field: &str, value: u32) -> Result<(), FitError> {
    if value == 0 {
        return Err(FitError::InvalidInput(format!("{field} must be at least 1")));
    }
    Ok(())
}
