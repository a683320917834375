//! HTTP request execution configuration.

use crate::config::PercentmanConfig;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for HTTP request execution.
///
/// Consumed once by [`RequestExecutor::new`](super::RequestExecutor::new);
/// the resulting client is immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Maximum time for a complete round trip (connect, headers and body).
    pub timeout: Duration,

    /// Whether 3xx responses are followed automatically.
    pub follow_redirects: bool,

    /// Redirect hop limit when following redirects.
    pub max_redirects: u32,

    /// Whether invalid TLS certificates are rejected.
    pub validate_ssl: bool,

    /// Headers sent with every request unless the request sets them itself.
    pub default_headers: BTreeMap<String, String>,
}

impl ExecutionConfig {
    /// Creates a config with the given timeout and defaults for everything else.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self::from(&PercentmanConfig::default())
    }
}

impl From<&PercentmanConfig> for ExecutionConfig {
    fn from(config: &PercentmanConfig) -> Self {
        Self {
            timeout: config.timeout_duration(),
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects,
            validate_ssl: config.validate_ssl,
            default_headers: config.default_headers.clone(),
        }
    }
}
