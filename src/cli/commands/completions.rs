//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::FitError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns `FitError::Parse` if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, FitError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "fittrack", &mut buf);
    String::from_utf8(buf).map_err(|e| FitError::Parse(format!("UTF-8 error: {e}")))
}
