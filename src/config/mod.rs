//! Configuration loading.
//!
//! Settings come from an optional JSON file and are merged over defaults.
//! The resulting [`PercentmanConfig`] is an ordinary value: build it once at
//! startup and hand the derived [`ExecutionConfig`](crate::executor::ExecutionConfig)
//! and [`StoreConfig`](crate::store::StoreConfig) to the components that need
//! them.

pub mod schema;

pub use schema::{CorruptStatePolicy, PercentmanConfig, DEFAULT_HISTORY_LIMIT};

use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings parsed but are not usable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Builds a configuration from a JSON value.
///
/// A value that does not deserialize is logged and replaced by the defaults;
/// a value that deserializes but fails validation is an error.
///
/// # Example
///
/// ```
/// use percentman::config::from_value;
/// use serde_json::json;
///
/// let config = from_value(json!({ "timeout": 60000, "historyLimit": 20 })).unwrap();
/// assert_eq!(config.timeout, 60000);
/// assert_eq!(config.history_limit, 20);
/// ```
pub fn from_value(settings: Value) -> Result<PercentmanConfig, ConfigError> {
    let defaults = PercentmanConfig::default();
    let config = match serde_json::from_value::<PercentmanConfig>(settings) {
        Ok(user_config) => defaults.merge(&user_config),
        Err(e) => {
            log::warn!("Failed to parse settings: {}. Using defaults.", e);
            defaults
        }
    };

    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}

/// Loads configuration from a JSON file.
///
/// A missing file yields the defaults. Unparsable content is logged and
/// replaced by the defaults, as in [`from_value`].
pub fn load_config(path: &Path) -> Result<PercentmanConfig, ConfigError> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(PercentmanConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_str::<Value>(&text) {
        Ok(value) => from_value(value),
        Err(e) => {
            log::warn!(
                "Config file {} is not valid JSON: {}. Using defaults.",
                path.display(),
                e
            );
            Ok(PercentmanConfig::default())
        }
    }
}
