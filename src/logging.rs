//! Diagnostic logging.
//!
//! Events go to stderr through a `tracing-subscriber` formatter filtered by
//! [`Config::log_filter`]. With the default `warn` filter the shell emits no
//! log lines at all during normal use.

use crate::config::Config;
use std::io::{self, IsTerminal};
use std::sync::OnceLock;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceLock<()> = OnceLock::new();

/// Errors encountered while installing the subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The filter directives could not be parsed.
    #[error("invalid log filter: {0}")]
    Filter(String),
    /// Another global subscriber is already installed.
    #[error("failed to install log subscriber: {0}")]
    Subscriber(String),
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(config: &Config) -> Result<(), LoggingError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = parse_filter(&config.log_filter)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(true)
        .try_init()
        .map_err(|err| LoggingError::Subscriber(err.to_string()))?;

    let _ = INSTALLED.set(());
    Ok(())
}

fn parse_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directives).map_err(|err| LoggingError::Filter(err.to_string()))
}
