//! Tracing subscriber initialization from the `[logging]` config section.

use std::io::{self, IsTerminal};

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use super::config::{LogFormat, LoggingConfig};

/// Initialize the global tracing subscriber.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| LoggingError::InvalidFilter(e.to_string()))?;

    match config.format {
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_ansi(io::stdout().is_terminal())
                .with_writer(io::stdout);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(io::stdout);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

    Ok(())
}

/// Errors that can occur during logging initialization.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(String),
}
