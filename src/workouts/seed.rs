//! Example workouts written on first run.

use chrono::{DateTime, Duration, Utc};

use super::types::{format_timestamp, WorkoutRecord};

/// Build the first-run workouts, dated today and the three days before `now`.
#[must_use]
pub fn seed_workouts(now: DateTime<Utc>) -> Vec<WorkoutRecord> {
    let entries = [
        ("Legs", "Back Squat - 5 sets x 15 reps - 30 kg - 10 min", 45, 350),
        ("Back", "Deadlift - 5 sets x 10 reps - 60 kg - 15 min", 50, 400),
        ("Shoulder", "Overhead Press - 4 sets x 12 reps - 25 kg - 12 min", 35, 280),
        ("ABS", "Crunches - 3 sets x 20 reps - bodyweight - 10 min", 30, 200),
    ];

    entries
        .iter()
        .zip(0_i64..)
        .map(|(&(kind, description, duration, calories), days_ago)| WorkoutRecord {
            id: format!("workout-{}", days_ago + 1),
            kind: kind.to_string(),
            description: description.to_string(),
            duration_minutes: duration,
            calories,
            date: format_timestamp(now - Duration::days(days_ago)),
        })
        .collect()
}
