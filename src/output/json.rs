//! JSON output formatting for fittrack.

use serde::Serialize;
use serde_json::json;

use crate::error::FitError;
use crate::workouts::{SyncState, WorkoutRecord};

/// Format a list of workouts as JSON
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_workouts_json(workouts: &[&WorkoutRecord], title: &str) -> Result<String, FitError> {
    let output = json!({
        "list": title,
        "count": workouts.len(),
        "items": workouts
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the result of a store mutation as JSON
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn format_mutation_json(
    action: &str,
    workout: &WorkoutRecord,
    sync: &SyncState,
) -> Result<String, FitError> {
    let mut output = json!({
        "action": action,
        "workout": workout,
        "synced": sync.is_synced(),
    });
    if let SyncState::Unsynced { reason } = sync {
        output["warning"] = json!(reason);
    }
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `FitError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FitError> {
    Ok(serde_json::to_string_pretty(value)?)
}
