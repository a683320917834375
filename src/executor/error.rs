//! HTTP request execution error types.
//!
//! These never escape [`RequestExecutor::execute`](super::RequestExecutor::execute):
//! they are rendered into [`ResponseResult::error`](crate::models::ResponseResult)
//! with `to_string()`. Keeping them typed lets the executor classify failures
//! and lets tests match on the kind.

use std::error::Error as StdError;
use thiserror::Error;

/// Errors that can occur while building or executing an HTTP request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request has no URL.
    #[error("URL is required")]
    EmptyUrl,

    /// The method token is not a valid HTTP method.
    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    /// A header name or value cannot be sent on the wire.
    #[error("Invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The request could not be assembled.
    #[error("Request build error: {0}")]
    Build(String),

    /// The request took longer than the configured timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The connection could not be established.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// TLS/SSL negotiation or certificate validation failed.
    #[error("TLS/SSL error: {0}")]
    Tls(String),

    /// Any other transport or protocol failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Status and headers arrived but the body could not be read.
    #[error("Failed to read response body: {0}")]
    BodyRead(String),

    /// The HTTP client itself could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl RequestError {
    /// Returns `true` for failures that happened on the wire rather than
    /// while validating or assembling the request.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RequestError::Timeout(_)
                | RequestError::Connect(_)
                | RequestError::Tls(_)
                | RequestError::Network(_)
                | RequestError::BodyRead(_)
        )
    }
}

/// Convert reqwest errors to RequestError.
///
/// reqwest's own `Display` hides the cause ("error sending request for url"),
/// so the message carries the whole source chain.
impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        let message = error_chain(&err);
        let lowered = message.to_ascii_lowercase();

        if err.is_timeout() {
            RequestError::Timeout(message)
        } else if err.is_builder() {
            if err.url().is_none() || lowered.contains("url") {
                RequestError::InvalidUrl(message)
            } else {
                RequestError::Build(message)
            }
        } else if lowered.contains("certificate")
            || lowered.contains("tls")
            || lowered.contains("ssl")
        {
            RequestError::Tls(message)
        } else if err.is_connect() {
            RequestError::Connect(message)
        } else {
            RequestError::Network(message)
        }
    }
}

/// Joins an error and all of its sources with `": "`.
pub(crate) fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
