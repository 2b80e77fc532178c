//! Command implementations for fittrack.
//!
//! Every handler takes a [`Context`] and returns the text to print.

mod auth;
mod completions;
mod stats;
mod workout;

pub use auth::{login, logout, profile, register, whoami};
pub use completions::completions;
pub use stats::{dashboard, stats};
pub use workout::{add, edit, list, remove, show};

use chrono::{DateTime, Local, Utc};

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::FitError;
use crate::session::Session;
use crate::stats::Calendar;
use crate::storage::{open_backend, KeyValueStore};

/// Everything a command needs besides its own arguments.
pub struct Context {
    /// Loaded settings.
    pub config: Config,
    /// Where data lives.
    pub paths: Paths,
    /// Resolved output format.
    pub format: OutputFormat,
    /// The instant the command runs at.
    pub now: DateTime<Utc>,
    /// Local calendar with the configured week start.
    pub calendar: Calendar<Local>,
}

impl Context {
    /// Build a context; `format` overrides `general.default_output`.
    #[must_use]
    pub fn new(config: Config, paths: Paths, format: Option<OutputFormat>) -> Self {
        let format = format.unwrap_or(config.general.default_output);
        let calendar = Calendar::local(config.stats.week_start);
        Self {
            config,
            paths,
            format,
            now: Utc::now(),
            calendar,
        }
    }

    /// Open the configured backend and resume whatever session it holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be opened.
    pub fn session(&self) -> Result<Session<Box<dyn KeyValueStore>>, FitError> {
        let storage = open_backend(self.config.storage.backend, &self.paths)?;
        Ok(Session::resume(storage))
    }

    /// Whether an empty store should be filled with example workouts.
    #[must_use]
    pub const fn seed(&self) -> bool {
        self.config.storage.seed_on_first_run
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_uses_configured_output_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.general.default_output = OutputFormat::Json;

        let ctx = Context::new(config.clone(), Paths::with_root(temp_dir.path().to_path_buf()), None);
        assert_eq!(ctx.format, OutputFormat::Json);

        let ctx = Context::new(
            config,
            Paths::with_root(temp_dir.path().to_path_buf()),
            Some(OutputFormat::Pretty),
        );
        assert_eq!(ctx.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_session_persists_between_contexts() {
        let (temp_dir, ctx) = test_support::logged_in(OutputFormat::Json);
        assert!(ctx.session().unwrap().is_authenticated());

        let again = Context::new(
            Config::default(),
            Paths::with_root(temp_dir.path().to_path_buf()),
            None,
        );
        assert!(again.session().unwrap().is_authenticated());
    }
}
