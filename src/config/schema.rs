//! Configuration schema.
//!
//! All settings are optional in the JSON file; missing fields take the
//! defaults below.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Default number of history entries kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// What to do when a persisted collection exists but cannot be read or parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CorruptStatePolicy {
    /// Start with an empty collection and move the unparsable file aside.
    #[default]
    StartEmpty,
    /// Refuse to open the store.
    Fail,
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentmanConfig {
    /// Request timeout in milliseconds. Must be greater than 0.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Whether to automatically follow HTTP redirects.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow. 0 is allowed.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate TLS certificates.
    ///
    /// **Warning:** disabling this accepts any certificate.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Headers added to every request that doesn't set them itself.
    #[serde(default = "default_headers")]
    pub default_headers: BTreeMap<String, String>,

    /// Maximum number of history entries to keep. Must be greater than 0.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Directory holding `templates.json` and `history.json`.
    ///
    /// Defaults to the per-user data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Load behavior for unreadable or unparsable state files.
    #[serde(default)]
    pub corrupt_state: CorruptStatePolicy,
}

impl Default for PercentmanConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            default_headers: default_headers(),
            history_limit: default_history_limit(),
            data_dir: None,
            corrupt_state: CorruptStatePolicy::default(),
        }
    }
}

impl PercentmanConfig {
    /// Checks the settings that have no sensible interpretation.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout == 0 {
            return Err("timeout must be greater than 0".to_string());
        }

        if self.history_limit == 0 {
            return Err("historyLimit must be greater than 0".to_string());
        }

        if self.default_headers.keys().any(|k| k.trim().is_empty()) {
            return Err("defaultHeaders must not contain empty header names".to_string());
        }

        Ok(())
    }

    /// Returns the timeout as a `Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout)
    }

    /// Overlays `other` on top of `self`.
    ///
    /// Scalar settings come from `other`. Default headers are combined, with
    /// `other` winning on name clashes, and `other.data_dir` only replaces
    /// ours when it is set.
    pub fn merge(&self, other: &PercentmanConfig) -> Self {
        let mut default_headers = self.default_headers.clone();
        default_headers.extend(other.default_headers.clone());

        Self {
            timeout: other.timeout,
            follow_redirects: other.follow_redirects,
            max_redirects: other.max_redirects,
            validate_ssl: other.validate_ssl,
            default_headers,
            history_limit: other.history_limit,
            data_dir: other.data_dir.clone().or_else(|| self.data_dir.clone()),
            corrupt_state: other.corrupt_state,
        }
    }
}

fn default_timeout() -> u64 {
    30_000
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(
        "User-Agent".to_string(),
        concat!("percentman/", env!("CARGO_PKG_VERSION")).to_string(),
    );
    headers
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}
