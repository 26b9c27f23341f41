//! Subscriber setup.
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

use crate::CliError;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "SCRIPTLOC_LOG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Directive for the given verbosity and `SCRIPTLOC_LOG` value.
///
/// `-v` and `-vv` win over the environment; otherwise the environment
/// directive is used, falling back to `info`.
#[must_use]
pub fn directive(verbose: u8, from_env: Option<&str>) -> String {
    match (verbose, from_env) {
        (0, Some(env)) if !env.trim().is_empty() => env.trim().to_string(),
        (0, _) => "info".to_string(),
        (1, _) => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns `CliError::Logging` for an invalid directive or when a
/// subscriber is already installed.
pub fn init(format: LogFormat, verbose: u8) -> Result<(), CliError> {
    let from_env = std::env::var(LOG_ENV).ok();
    let directive = directive(verbose, from_env.as_deref());
    let filter =
        EnvFilter::try_new(&directive).map_err(|err| CliError::Logging(err.to_string()))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = match format {
        LogFormat::Text => builder.with_target(false).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|err| CliError::Logging(err.to_string()))
}
