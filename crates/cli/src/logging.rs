//! Diagnostic logging to stderr.
//!
//! The library crates log through the `log` facade; the subscriber's
//! `tracing-log` bridge picks those records up. `RUST_LOG` wins over the
//! command-line level.

use std::fmt;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum LoggingError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggingError::EnvFilter { value, .. } => {
                write!(f, "invalid log filter '{value}'")
            }
            LoggingError::Subscriber(err) => write!(f, "logging setup failed: {err}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggingError::EnvFilter { source, .. } => Some(source),
            LoggingError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Level used when `RUST_LOG` is unset.
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

pub fn init(level: &str) -> Result<(), LoggingError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|source| LoggingError::EnvFilter {
            value: level.to_string(),
            source,
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(LoggingError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(default_level(true, true), "error");
        assert_eq!(default_level(true, false), "debug");
        assert_eq!(default_level(false, false), "warn");
    }
}
