//! Workout records and the store that owns them.
//!
//! - [`WorkoutRecord`] - one logged session, in its persisted shape
//! - [`WorkoutStore`] - create/update/delete/list with best-effort persistence
//! - [`ExerciseDetail`] - structured view of a description

mod description;
mod seed;
mod store;
mod types;

pub use description::ExerciseDetail;
pub use seed::seed_workouts;
pub use store::{SyncState, WorkoutStore};
pub use types::{format_timestamp, sort_newest_first, NewWorkout, WorkoutPatch, WorkoutRecord};
