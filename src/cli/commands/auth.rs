//! Login, registration and profile commands.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, ProfileArgs};
use crate::error::FitError;
use crate::output::{format_profile, to_json};
use crate::session::{ProfilePatch, UserProfile};

use super::Context;

fn signed_in(verb: &str, profile: &UserProfile, format: OutputFormat) -> Result<String, FitError> {
    match format {
        OutputFormat::Json => to_json(profile),
        OutputFormat::Pretty => Ok(format!(
            "{} {} as {} <{}>",
            "✓".green(),
            verb,
            profile.name.bold(),
            profile.email
        )),
    }
}

/// Execute login command
///
/// # Errors
///
/// Returns `FitError::Auth` for wrong credentials, or a storage error.
pub fn login(ctx: &Context, email: &str, password: &str) -> Result<String, FitError> {
    let mut session = ctx.session()?;
    let profile = session.login(email, password)?;
    signed_in("Logged in", profile, ctx.format)
}

/// Execute register command
///
/// # Errors
///
/// Returns `FitError::InvalidInput` or `FitError::Auth` if registration is refused.
pub fn register(ctx: &Context, name: &str, email: &str, password: &str) -> Result<String, FitError> {
    let mut session = ctx.session()?;
    let profile = session.register(name, email, password, ctx.now)?;
    signed_in("Registered and logged in", profile, ctx.format)
}

/// Execute logout command
///
/// Logging out without a session is not an error.
///
/// # Errors
///
/// Returns an error if the stored session cannot be removed.
pub fn logout(ctx: &Context) -> Result<String, FitError> {
    let mut session = ctx.session()?;
    let was_logged_in = session.is_authenticated();
    session.logout()?;

    match ctx.format {
        OutputFormat::Json => to_json(&json!({ "logged_out": was_logged_in })),
        OutputFormat::Pretty if was_logged_in => Ok(format!("{} Logged out", "✓".green())),
        OutputFormat::Pretty => Ok("Not logged in".dimmed().to_string()),
    }
}

/// Execute whoami command
///
/// # Errors
///
/// Returns `FitError::NotAuthenticated` when nobody is logged in.
pub fn whoami(ctx: &Context) -> Result<String, FitError> {
    let session = ctx.session()?;
    let profile = session.current().ok_or(FitError::NotAuthenticated)?;
    format_profile(profile, ctx.format)
}

/// Execute profile command
///
/// Without any field flags the current profile is shown unchanged.
///
/// # Errors
///
/// Returns `FitError::NotAuthenticated` when nobody is logged in.
pub fn profile(ctx: &Context, args: ProfileArgs) -> Result<String, FitError> {
    let mut session = ctx.session()?;
    let patch = ProfilePatch {
        name: args.name,
        email: args.email,
        avatar: args.avatar,
    };

    if patch == ProfilePatch::default() {
        let profile = session.current().ok_or(FitError::NotAuthenticated)?;
        return format_profile(profile, ctx.format);
    }

    let updated = session.update_profile(&patch)?;
    format_profile(updated, ctx.format)
}
