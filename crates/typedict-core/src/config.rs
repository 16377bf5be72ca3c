//! Type dictionary configuration.
//!
//! # Load Order
//!
//! 1. Default values (compile-time)
//! 2. TOML file (`DictionaryConfig::load`)
//! 3. Environment variables (`TYPEDICT_LOG`)
//!
//! Each layer overrides the previous.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::MessageType;

/// Environment variable overriding `logging.filter`.
pub const LOG_FILTER_ENV: &str = "TYPEDICT_LOG";

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML from a file.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Failed to parse TOML from a string.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Start-up checks and logging for the type dictionary.
///
/// # Example
///
/// ```toml
/// expected_handlers = ["acme.orders.OrderPlaced"]
/// require_parsers = true
///
/// [logging]
/// filter = "typedict_core=debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Message types that must end up with a handler.
    pub expected_handlers: Vec<String>,

    /// Fail the build when a handled message type has no parser.
    pub require_parsers: bool,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl DictionaryConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded type dictionary config");
        Ok(config)
    }

    /// Applies environment overrides from the process environment.
    pub fn apply_env(self) -> Self {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Applies environment overrides using `lookup` (for testing).
    pub fn apply_env_with(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(filter) = lookup(LOG_FILTER_ENV).filter(|f| !f.trim().is_empty()) {
            self.logging.filter = filter;
        }
        self
    }

    pub fn expected_message_types(&self) -> Vec<MessageType> {
        self.expected_handlers
            .iter()
            .map(|name| MessageType::new(name.as_str()))
            .collect()
    }
}
