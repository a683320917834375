//! Display helpers for response panels and history lists.

use crate::formatter::json::format_pretty;
use crate::models::ResponseResult;
use reqwest::StatusCode;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Coarse classification of an HTTP status code, used to pick a color or
/// emphasis for the status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 1xx, or anything outside the standard ranges.
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirect,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
}

impl StatusClass {
    pub fn of(status_code: u16) -> Self {
        match status_code {
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirect,
            400..=499 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Informational,
        }
    }

    /// Returns `true` for 4xx and 5xx.
    pub fn is_failure(self) -> bool {
        matches!(self, StatusClass::ClientError | StatusClass::ServerError)
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusClass::Informational => "info",
            StatusClass::Success => "success",
            StatusClass::Redirect => "redirect",
            StatusClass::ClientError => "client error",
            StatusClass::ServerError => "server error",
        };
        f.write_str(label)
    }
}

/// Canonical reason phrase for a status code, or `""` if it has none.
pub fn reason_phrase(status_code: u16) -> &'static str {
    StatusCode::from_u16(status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("")
}

/// Formats a duration as `"123ms"`, or `"1.234s"` from one second up.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", elapsed.as_secs_f64())
    }
}

/// Renders headers as `name: value` lines.
pub fn format_headers(headers: &BTreeMap<String, String>) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}\n", name, value))
        .collect()
}

/// Body text for display: pretty JSON when the body is JSON, raw otherwise.
pub fn display_body(body: &str) -> String {
    format_pretty(body)
}

/// Status line for display.
///
/// Entries recorded without a `status` field are rebuilt from the code.
pub fn status_text(result: &ResponseResult) -> String {
    if !result.status_line.is_empty() {
        return result.status_line.clone();
    }
    let reason = reason_phrase(result.status_code);
    if reason.is_empty() {
        result.status_code.to_string()
    } else {
        format!("{} {}", result.status_code, reason)
    }
}

/// One-line summary of an execution outcome.
pub fn summarize(result: &ResponseResult) -> String {
    match result.error_message() {
        Some(error) => format!("Error: {}", error),
        None => format!("{} ({})", status_text(result), format_elapsed(result.elapsed)),
    }
}
