//! Server configuration parsing.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::CatalogSources;

/// Server configuration loaded from a TOML file.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Bind settings.
    pub server: ServerConfig,
    /// Data source and storage paths.
    pub data: DataConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server bind settings.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1" or "0.0.0.0").
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
}

/// Data source and storage paths.
#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// Item source files, one per item kind.
    pub items: Vec<PathBuf>,
    /// Monster source file.
    pub monsters: PathBuf,
    /// Optional client-info description table.
    pub descriptions: Option<PathBuf>,
    /// Image cache directory (populated by the external downloader).
    pub images_dir: PathBuf,
    /// Popularity state file.
    pub popularity_file: PathBuf,
}

/// Logging settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive (e.g., "info" or "rodb=debug,info").
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Get the socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

impl DataConfig {
    /// Catalog source paths for the loader.
    pub fn sources(&self) -> CatalogSources {
        CatalogSources {
            items: self.items.clone(),
            monsters: self.monsters.clone(),
            descriptions: self.descriptions.clone(),
        }
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
