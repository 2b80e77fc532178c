//! Tracing subscriber setup.
//!
//! Logs go to stderr so JSON on stdout stays machine-readable.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a log filter directive (e.g. `fittrack=debug`).
pub const LOG_ENV: &str = "FITTRACK_LOG";

/// Choose the filter directive: `FITTRACK_LOG` wins, then `--verbose`, then the configured level.
#[must_use]
pub fn filter_directive(env_value: Option<&str>, configured: &str, verbose: bool) -> String {
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directive) => directive.to_string(),
        None if verbose => "debug".to_string(),
        None if configured.trim().is_empty() => "warn".to_string(),
        None => configured.trim().to_string(),
    }
}

/// Install the global subscriber.
///
/// A second call is a no-op.
pub fn init(configured_level: &str, verbose: bool) {
    let env_value = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env_value.as_deref(), configured_level, verbose);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
