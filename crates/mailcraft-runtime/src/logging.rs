#![forbid(unsafe_code)]

//! Process-wide tracing subscriber installation.
//!
//! Library code only emits `tracing` events; the host application decides
//! where they go. Hosts that have no subscriber of their own can call
//! [`init_logging`] once at startup.

use std::fmt;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Errors raised while installing the subscriber.
#[derive(Debug)]
pub enum LoggingError {
    /// The filter directive did not parse.
    Filter(tracing_subscriber::filter::ParseError),
    /// A global subscriber was already installed.
    AlreadyInstalled(String),
}

impl fmt::Display for LoggingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(e) => write!(f, "invalid log filter: {e}"),
            Self::AlreadyInstalled(msg) => write!(f, "log subscriber already installed: {msg}"),
        }
    }
}

impl std::error::Error for LoggingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Filter(e) => Some(e),
            Self::AlreadyInstalled(_) => None,
        }
    }
}

/// Build the filter for `config`, failing on malformed directives.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(&config.filter).map_err(LoggingError::Filter)
}

/// Install a global `fmt` subscriber described by `config`.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;
    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(config.with_target)
            .try_init()
    };
    installed.map_err(|e| LoggingError::AlreadyInstalled(e.to_string()))?;
    tracing::debug!(target: "mailcraft.logging", json = config.json, "logging initialized");
    Ok(())
}
