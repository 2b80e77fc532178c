//! Workout commands: add, edit, rm, list, show.

use crate::cli::args::{AddArgs, EditArgs};
use crate::error::FitError;
use crate::output::{format_mutation, format_workout, format_workouts};
use crate::workouts::{sort_newest_first, NewWorkout, WorkoutPatch};

use super::Context;

/// Execute add command
///
/// # Errors
///
/// Returns `FitError::InvalidInput` for a blank type or zero duration/calories,
/// or `FitError::NotAuthenticated` without a session.
pub fn add(ctx: &Context, args: AddArgs) -> Result<String, FitError> {
    let mut workout =
        NewWorkout::new(args.kind, args.duration, args.calories).with_description(args.description);
    if let Some(date) = args.date {
        workout = workout.at(date);
    }
    workout.validate()?;

    let mut session = ctx.session()?;
    let mut store = session.workouts(ctx.now, ctx.seed())?;
    let record = store.add(workout, ctx.now);
    format_mutation("Added", &record, store.sync_state(), ctx.format)
}

/// Execute edit command
///
/// # Errors
///
/// Returns `FitError::InvalidInput` when nothing would change or a value is
/// rejected, and `FitError::NotFound` for an unknown id.
pub fn edit(ctx: &Context, args: EditArgs) -> Result<String, FitError> {
    let patch = WorkoutPatch {
        kind: args.kind,
        description: args.description,
        duration_minutes: args.duration,
        calories: args.calories,
        date: args.date,
    };
    if patch.is_empty() {
        return Err(FitError::InvalidInput(
            "Nothing to change (pass --type, --duration, --calories, --description or --date)"
                .to_string(),
        ));
    }
    patch.validate()?;

    let mut session = ctx.session()?;
    let mut store = session.workouts(ctx.now, ctx.seed())?;
    let record = store.update(&args.id, &patch)?;
    format_mutation("Updated", &record, store.sync_state(), ctx.format)
}

/// Execute rm command
///
/// # Errors
///
/// Returns `FitError::NotFound` for an unknown id.
pub fn remove(ctx: &Context, id: &str) -> Result<String, FitError> {
    let mut session = ctx.session()?;
    let mut store = session.workouts(ctx.now, ctx.seed())?;
    let record = store.delete(id)?;
    format_mutation("Deleted", &record, store.sync_state(), ctx.format)
}

/// Execute list command
///
/// # Errors
///
/// Returns `FitError::NotAuthenticated` without a session, or an output error.
pub fn list(ctx: &Context, search: Option<&str>) -> Result<String, FitError> {
    let mut session = ctx.session()?;
    let store = session.workouts(ctx.now, ctx.seed())?;

    match search {
        Some(term) => {
            let found = store.search(term);
            format_workouts(&found, &format!("Workouts matching '{term}'"), ctx.format)
        }
        None => {
            let mut all: Vec<_> = store.list().iter().collect();
            sort_newest_first(&mut all);
            format_workouts(&all, "Workouts", ctx.format)
        }
    }
}

/// Execute show command
///
/// # Errors
///
/// Returns `FitError::NotFound` for an unknown id.
pub fn show(ctx: &Context, id: &str) -> Result<String, FitError> {
    let mut session = ctx.session()?;
    let store = session.workouts(ctx.now, ctx.seed())?;
    let record = store
        .get(id)
        .ok_or_else(|| FitError::NotFound(format!("Workout '{id}'")))?;
    format_workout(record, ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::cli::commands::test_support::logged_in;
    use crate::config::{Config, Paths};
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tempfile::TempDir;

    fn add_args(kind: &str, duration: u32, calories: u32) -> AddArgs {
        AddArgs {
            kind: kind.to_string(),
            duration,
            calories,
            description: String::new(),
            date: None,
        }
    }

    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            kind: None,
            duration: None,
            calories: None,
            description: None,
            date: None,
        }
    }

    fn json(output: &str) -> Value {
        serde_json::from_str(output).unwrap()
    }

    #[test]
    fn test_list_starts_with_seed_data() {
        let (_dir, ctx) = logged_in(OutputFormat::Json);
        let parsed = json(&list(&ctx, None).unwrap());
        assert_eq!(parsed["count"], 4);
        assert_eq!(parsed["items"][0]["id"], "workout-1");
        assert_eq!(parsed["items"][0]["type"], "Legs");
    }

    #[test]
    fn test_list_without_seeding() {
        let (_dir, mut ctx) = logged_in(OutputFormat::Json);
        ctx.config.storage.seed_on_first_run = false;
        assert_eq!(json(&list(&ctx, None).unwrap())["count"], 0);
    }

    #[test]
    fn test_add_then_rm_restores_list() {
        let (_dir, ctx) = logged_in(OutputFormat::Json);
        let before = json(&list(&ctx, None).unwrap());

        let added = json(&add(&ctx, add_args("Running", 30, 320)).unwrap());
        assert_eq!(added["action"], "added");
        assert_eq!(added["synced"], true);
        let id = added["workout"]["id"].as_str().unwrap().to_string();
        assert_eq!(json(&list(&ctx, None).unwrap())["count"], 5);

        let removed = json(&remove(&ctx, &id).unwrap());
        assert_eq!(removed["workout"]["id"], id.as_str());
        assert_eq!(json(&list(&ctx, None).unwrap()), before);
    }

    #[test]
    fn test_add_rejects_zero_calories() {
        let (_dir, ctx) = logged_in(OutputFormat::Json);
        let err = add(&ctx, add_args("Running", 30, 0)).unwrap_err();
        assert!(matches!(err, FitError::InvalidInput(_)));
        assert_eq!(json(&list(&ctx, None).unwrap())["count"], 4);
    }

    #[test]
    fn test_add_with_date() {
        let (_dir, ctx) = logged_in(OutputFormat::Json);
        let mut args = add_args("Back", 50, 400);
        args.date = Some(Utc.with_ymd_and_hms(2025, 4, 14, 17, 0, 0).unwrap());

        let added = json(&add(&ctx, args).unwrap());
        assert_eq!(added["workout"]["date"], "2025-04-14T17:00:00.000Z");
    }

    #[test]
    fn test_commands_require_login() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = Context::new(
            Config::default(),
            Paths::with_root(temp_dir.path().to_path_buf()),
            Some(OutputFormat::Json),
        );

        assert!(matches!(list(&ctx, None), Err(FitError::NotAuthenticated)));
        assert!(matches!(
            add(&ctx, add_args("Running", 30, 320)),
            Err(FitError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_edit_changes_only_given_fields() {
        let (_dir, ctx) = logged_in(OutputFormat::Json);
        let mut args = edit_args("workout-2");
        args.calories = Some(420);

        let updated = json(&edit(&ctx, args).unwrap());
        assert_eq!(updated["action"], "updated");
        assert_eq!(updated["workout"]["calories"], 420);
        assert_eq!(updated["workout"]["type"], "Back");
        assert_eq!(updated["workout"]["duration"], 50);
    }

    #[test]
    fn test_edit_needs_a_change() {
        let (_dir, ctx) = logged_in(OutputFormat::Json);
        assert!(matches!(
            edit(&ctx, edit_args("workout-1")),
            Err(FitError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let (_dir, ctx) = logged_in(OutputFormat::Json);
        let mut args = edit_args("workout-99");
        args.duration = Some(10);

        assert!(edit(&ctx, args).unwrap_err().is_not_found());
        assert!(remove(&ctx, "workout-99").unwrap_err().is_not_found());
        assert!(show(&ctx, "workout-99").unwrap_err().is_not_found());
        assert_eq!(json(&list(&ctx, None).unwrap())["count"], 4);
    }

    #[test]
    fn test_search_and_show() {
        let (_dir, ctx) = logged_in(OutputFormat::Json);
        let found = json(&list(&ctx, Some("deadlift")).unwrap());
        assert_eq!(found["count"], 1);
        assert_eq!(found["items"][0]["id"], "workout-2");

        let shown = json(&show(&ctx, "workout-3").unwrap());
        assert_eq!(shown["type"], "Shoulder");
    }

    #[test]
    fn test_delete_last_workout_stays_empty() {
        let (_dir, ctx) = logged_in(OutputFormat::Json);
        for id in ["workout-1", "workout-2", "workout-3", "workout-4"] {
            remove(&ctx, id).unwrap();
        }
        assert_eq!(json(&list(&ctx, None).unwrap())["count"], 0);
    }
}
