//! HTTP request data models.
//!
//! A [`RequestSpec`] is the user-authored description of one HTTP call. It is
//! plain owned data: cloning it yields a fully independent copy, which is what
//! the store relies on when it keeps a template or history record.

use serde::{Deserialize, Serialize};

/// Method used when a request does not name one.
pub const DEFAULT_METHOD: &str = "GET";

/// Methods offered by the request composer.
///
/// Any other token is still accepted by the executor; this list only drives
/// method pickers.
pub const SUPPORTED_METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS"];

/// A single request header row.
///
/// Disabled rows are kept so the user can toggle them back on without
/// retyping the value, but they are never sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    /// Header name as typed by the user.
    pub key: String,

    /// Header value as typed by the user.
    pub value: String,

    /// Whether the header is included in the outgoing request.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl HeaderEntry {
    /// Creates an enabled header row.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled header row.
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::new(key, value)
        }
    }

    /// Returns `true` if this row contributes to the outgoing request.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }

    /// Parses a `"Name: value"` line into an enabled header row.
    ///
    /// Returns `None` when the line has no colon or an empty name.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (key, value) = line.split_once(':')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some(Self::new(key, value.trim()))
    }
}

/// The user-authored description of an HTTP call.
///
/// Header order is preserved for display. The URL may be empty while the
/// user is still typing; the executor rejects it at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// HTTP method token, `GET` by default.
    #[serde(default = "default_method")]
    pub method: String,

    /// Target URL, with or without an `http://`/`https://` prefix.
    #[serde(default)]
    pub url: String,

    /// Header rows in insertion order.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub headers: Vec<HeaderEntry>,

    /// Raw request body. Empty means no body is sent.
    #[serde(default)]
    pub body: String,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self {
            method: default_method(),
            url: String::new(),
            headers: Vec::new(),
            body: String::new(),
        }
    }
}

impl RequestSpec {
    /// Creates a request with the given method and URL and no headers or body.
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// Appends a header row, builder style.
    pub fn with_header(mut self, header: HeaderEntry) -> Self {
        self.headers.push(header);
        self
    }

    /// Sets the body, builder style.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns `true` if a request body will be sent.
    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    /// Returns the method to send, falling back to `GET` when blank.
    pub fn effective_method(&self) -> &str {
        let method = self.method.trim();
        if method.is_empty() {
            DEFAULT_METHOD
        } else {
            method
        }
    }

    /// Iterates over the header rows that will actually be sent.
    pub fn active_headers(&self) -> impl Iterator<Item = &HeaderEntry> {
        self.headers.iter().filter(|h| h.is_active())
    }

    /// One-line `METHOD url` summary, used for list entries and tooltips.
    pub fn summary(&self) -> String {
        format!("{} {}", self.effective_method(), self.url)
    }
}
