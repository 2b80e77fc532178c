//! Output formatting for fittrack.
//!
//! This module provides formatters for displaying workouts and statistics
//! as colored terminal text or JSON.

mod json;
mod pretty;

use std::collections::BTreeMap;

use crate::cli::args::OutputFormat;
use crate::error::FitError;
use crate::session::UserProfile;
use crate::stats::{DailyTotal, DashboardView, DaySummary, RecencyBuckets};
use crate::workouts::{SyncState, WorkoutRecord};

pub use json::*;
pub use pretty::*;

/// Format workouts based on output format
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_workouts(
    workouts: &[&WorkoutRecord],
    title: &str,
    format: OutputFormat,
) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_workouts_pretty(workouts, title)),
        OutputFormat::Json => format_workouts_json(workouts, title),
    }
}

/// Format a single workout based on output format
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_workout(workout: &WorkoutRecord, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_workout_pretty(workout)),
        OutputFormat::Json => to_json(workout),
    }
}

/// Format the result of an add/edit/delete
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_mutation(
    action: &str,
    workout: &WorkoutRecord,
    sync: &SyncState,
    format: OutputFormat,
) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_mutation_pretty(action, workout, sync)),
        OutputFormat::Json => format_mutation_json(&action.to_lowercase(), workout, sync),
    }
}

/// Format a day summary
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_summary(summary: &DaySummary, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary)),
        OutputFormat::Json => to_json(summary),
    }
}

/// Format a category tally
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_tally(tally: &BTreeMap<String, usize>, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_tally_pretty(tally)),
        OutputFormat::Json => to_json(tally),
    }
}

/// Format a daily series
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_series(series: &[DailyTotal], format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_series_pretty(series)),
        OutputFormat::Json => to_json(&series),
    }
}

/// Format recency buckets
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_buckets(buckets: &RecencyBuckets<'_>, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_buckets_pretty(buckets)),
        OutputFormat::Json => to_json(buckets),
    }
}

/// Format the dashboard
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_dashboard(view: &DashboardView<'_>, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_dashboard_pretty(view)),
        OutputFormat::Json => to_json(view),
    }
}

/// Format a user profile
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_profile(profile: &UserProfile, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Pretty => Ok(format_profile_pretty(profile)),
        OutputFormat::Json => to_json(profile),
    }
}
