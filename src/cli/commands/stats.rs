//! Statistics command implementation.
//!
//! Handles the stats subcommands and the dashboard.

use crate::cli::args::StatsCommands;
use crate::error::FitError;
use crate::output::{format_buckets, format_dashboard, format_series, format_summary, format_tally};
use crate::stats::{bucket_by_recency, category_tally, daily_series, summary_for_day, DashboardView};

use super::Context;

/// Execute stats subcommands.
///
/// # Errors
///
/// Returns `FitError::NotAuthenticated` without a session, or
/// `FitError::InvalidInput` for a zero-day series.
pub fn stats(ctx: &Context, cmd: Option<StatsCommands>) -> Result<String, FitError> {
    let mut session = ctx.session()?;
    let store = session.workouts(ctx.now, ctx.seed())?;
    let records = store.list();
    let today = ctx.calendar.date_of(&ctx.now);

    match cmd.unwrap_or(StatsCommands::Summary { date: None }) {
        StatsCommands::Summary { date } => {
            let summary = summary_for_day(records, date.unwrap_or(today), &ctx.calendar);
            format_summary(&summary, ctx.format)
        }
        StatsCommands::Tally => format_tally(&category_tally(records), ctx.format),
        StatsCommands::Series { days, ending } => {
            let days = days.unwrap_or(ctx.config.stats.series_days);
            if days == 0 {
                return Err(FitError::InvalidInput("--days must be at least 1".to_string()));
            }
            let series = daily_series(records, days, ending.unwrap_or(today), &ctx.calendar)?;
            format_series(&series, ctx.format)
        }
        StatsCommands::Buckets => {
            let buckets = bucket_by_recency(records, ctx.now, &ctx.calendar);
            format_buckets(&buckets, ctx.format)
        }
    }
}

/// Execute dashboard command
///
/// # Errors
///
/// Returns `FitError::NotAuthenticated` without a session, or
/// `FitError::InvalidInput` for an out-of-range series length.
pub fn dashboard(ctx: &Context) -> Result<String, FitError> {
    let mut session = ctx.session()?;
    let store = session.workouts(ctx.now, ctx.seed())?;
    let view = DashboardView::build(
        store.list(),
        ctx.now,
        &ctx.calendar,
        ctx.config.stats.series_days,
        ctx.config.stats.recent_limit,
    )?;
    format_dashboard(&view, ctx.format)
}
