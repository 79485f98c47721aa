//! HTTP API server for the catalog and popularity tracker.
//!
//! Thin axum layer over [`crate::query::Query`]: routing, parameter
//! extraction, JSON shaping, and cached-image serving. All domain logic
//! lives in the core modules.

mod config;
mod error;
mod logging;
mod routes;
mod state;

pub use config::{Config, ConfigError, DataConfig, LogFormat, LoggingConfig, ServerConfig};
pub use error::ApiError;
pub use logging::init as init_logging;
pub use routes::router;
pub use state::{AppState, StateError};
