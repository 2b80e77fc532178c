//! Error types for fittrack.

use thiserror::Error;

/// Errors produced by the fittrack library and CLI.
#[derive(Debug, Error)]
pub enum FitError {
    /// A workout, profile or other item does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Durable storage could not be read or written.
    ///
    /// The in-memory state stays authoritative when this occurs.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Configuration could not be loaded, saved or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The SQLite backend reported an error.
    #[error("Database error: {0}")]
    Database(String),

    /// Serialized data could not be parsed or produced.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A caller-supplied value was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Login or registration was refused.
    #[error("{0}")]
    Auth(String),

    /// The command needs a logged-in session.
    #[error("Not logged in (run `fittrack login` first)")]
    NotAuthenticated,

    /// Filesystem error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for FitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl FitError {
    /// Whether this error is a missing-item error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
