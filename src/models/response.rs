//! HTTP response data models.
//!
//! A [`ResponseResult`] is the outcome of one execution attempt. Either the
//! response fields are populated or `error` is set; callers must check
//! [`ResponseResult::is_error`] first, because a body read failure leaves the
//! status and headers filled in alongside the error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Outcome of one request execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseResult {
    /// HTTP status code, `0` when the request never got a response.
    #[serde(default)]
    pub status_code: u16,

    /// Status line, e.g. `"200 OK"`.
    #[serde(default, rename = "status")]
    pub status_line: String,

    /// Response headers. Repeated headers are joined with `", "` in the
    /// order the server sent them.
    ///
    /// Names recorded by the executor are lowercase (`content-type`). Older
    /// history files may carry canonical casing (`Content-Type`); use
    /// [`ResponseResult::header`] for case-insensitive lookups.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub headers: BTreeMap<String, String>,

    /// Response body decoded as UTF-8 (invalid sequences replaced).
    #[serde(default)]
    pub body: String,

    /// Wall-clock time of the network round trip.
    #[serde(default, rename = "response_time", with = "duration_nanos")]
    pub elapsed: Duration,

    /// Failure description. Omitted from the serialized form when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ResponseResult {
    /// Creates a failed result carrying only an error message and timing.
    pub fn failed(error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            error: Some(error.into()),
            elapsed,
            ..Self::default()
        }
    }

    /// Returns `true` if the execution failed.
    ///
    /// An empty error string counts as no error.
    pub fn is_error(&self) -> bool {
        self.error.as_deref().is_some_and(|e| !e.is_empty())
    }

    /// Returns the error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        !self.is_error() && (200..300).contains(&self.status_code)
    }

    /// Gets a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// Durations are stored as integer nanoseconds.
mod duration_nanos {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let nanos = u64::try_from(value.as_nanos()).unwrap_or(u64::MAX);
        serializer.serialize_u64(nanos)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Negative values cannot come from a real measurement; clamp them.
        let nanos = i64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos.max(0) as u64))
    }
}
