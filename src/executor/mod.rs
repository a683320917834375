//! HTTP request executor.
//!
//! [`RequestExecutor`] turns a [`RequestSpec`] into exactly one blocking HTTP
//! round trip and captures the outcome as a [`ResponseResult`]. It never
//! returns an error to the caller: validation, transport, and body read
//! failures all land in [`ResponseResult::error`].
//!
//! The executor holds no mutable state. One instance can be shared across
//! threads and used for any number of concurrent calls; each call is an
//! independent request with no caching.
//!
//! # Request normalization
//!
//! - An empty URL fails immediately with `"URL is required"`.
//! - A URL without an `http://` or `https://` prefix gets `http://` prepended.
//! - Only enabled headers with a non-empty name are sent; a later row with the
//!   same name replaces an earlier one.
//! - A non-empty body without an explicit `Content-Type` is sent as
//!   `application/json`.
//! - An empty body means no body at all, not a zero-length one.

pub mod config;
pub mod error;

pub use config::ExecutionConfig;
pub use error::RequestError;

use crate::models::{RequestSpec, ResponseResult};
use error::error_chain;
use reqwest::blocking::{Client, Request};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Method, StatusCode};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Content type assumed for request bodies that don't declare one.
pub const DEFAULT_BODY_CONTENT_TYPE: &str = "application/json";

/// Executes HTTP requests described by [`RequestSpec`] values.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    config: ExecutionConfig,
}

impl RequestExecutor {
    /// Builds an executor with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `RequestError::InvalidHeader` if a configured default header
    /// cannot be encoded, or `RequestError::Client` if the TLS backend fails
    /// to initialize.
    pub fn new(config: ExecutionConfig) -> Result<Self, RequestError> {
        let redirect = if config.follow_redirects {
            Policy::limited(config.max_redirects as usize)
        } else {
            Policy::none()
        };

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let (name, value) = encode_header(name, value)?;
            default_headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .default_headers(default_headers)
            .build()
            .map_err(|e| RequestError::Client(error_chain(&e)))?;

        Ok(Self { client, config })
    }

    /// Builds an executor with [`ExecutionConfig::default`].
    pub fn with_defaults() -> Result<Self, RequestError> {
        Self::new(ExecutionConfig::default())
    }

    /// Returns the configuration this executor was built with.
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Performs one HTTP round trip.
    ///
    /// `elapsed` covers the network call from just before the request is
    /// issued until the status and headers arrive (or the call fails). It is
    /// zero when the request never left the process: empty URL, invalid
    /// method, or a header that cannot be encoded.
    ///
    /// If the body cannot be read after the headers arrived, the result keeps
    /// the status and headers but also carries
    /// `"Failed to read response body: ..."`. Check
    /// [`ResponseResult::is_error`] before trusting any other field.
    pub fn execute(&self, spec: &RequestSpec) -> ResponseResult {
        if spec.url.is_empty() {
            return ResponseResult::failed(RequestError::EmptyUrl.to_string(), Duration::ZERO);
        }

        let url = normalize_url(&spec.url);
        let request = match self.build_request(spec, &url) {
            Ok(request) => request,
            Err(err) => {
                log::debug!("Rejected {} {}: {}", spec.effective_method(), url, err);
                return ResponseResult::failed(err.to_string(), Duration::ZERO);
            }
        };

        log::debug!("Dispatching {} {}", request.method(), request.url());
        let started = Instant::now();
        let sent = self.client.execute(request);
        let elapsed = started.elapsed();

        let response = match sent {
            Ok(response) => response,
            Err(err) => {
                let err = RequestError::from(err);
                if err.is_transport() {
                    log::warn!("{} {} failed after {:?}: {}", spec.effective_method(), url, elapsed, err);
                } else {
                    log::debug!("Rejected {} {}: {}", spec.effective_method(), url, err);
                }
                return ResponseResult::failed(err.to_string(), elapsed);
            }
        };

        let mut result = ResponseResult {
            status_code: response.status().as_u16(),
            status_line: status_line(response.status()),
            headers: collect_headers(response.headers()),
            elapsed,
            ..ResponseResult::default()
        };

        match response.bytes() {
            Ok(bytes) => result.body = String::from_utf8_lossy(&bytes).into_owned(),
            Err(err) => {
                let err = RequestError::BodyRead(error_chain(&err));
                log::warn!("{} {}: {}", spec.effective_method(), url, err);
                result.error = Some(err.to_string());
            }
        }

        log::debug!(
            "{} {} -> {} in {:?} ({} bytes)",
            spec.effective_method(),
            url,
            result.status_line,
            elapsed,
            result.body.len()
        );
        result
    }

    fn build_request(&self, spec: &RequestSpec, url: &str) -> Result<Request, RequestError> {
        let method = Method::from_bytes(spec.effective_method().as_bytes())
            .map_err(|_| RequestError::InvalidMethod(spec.method.clone()))?;

        let mut builder = self
            .client
            .request(method, url)
            .headers(outgoing_headers(spec)?);

        if spec.has_body() {
            builder = builder.body(spec.body.clone());
        }

        builder.build().map_err(RequestError::from)
    }
}

/// Prepends `http://` unless the URL already starts with `http://` or
/// `https://` (case-insensitive). No other validation happens here.
pub fn normalize_url(url: &str) -> String {
    let has_scheme = ["http://", "https://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    });

    if has_scheme {
        url.to_string()
    } else {
        format!("http://{}", url)
    }
}

/// Computes the header set sent for `spec`.
///
/// Disabled rows and rows with a blank name are skipped. Names are
/// case-insensitive, so `content-type` and `Content-Type` collapse into one
/// entry and the later row wins.
pub fn outgoing_headers(spec: &RequestSpec) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::new();
    for entry in spec.active_headers() {
        let (name, value) = encode_header(&entry.key, &entry.value)?;
        headers.insert(name, value);
    }

    let has_content_type = headers
        .get(CONTENT_TYPE)
        .is_some_and(|value| !value.is_empty());
    if spec.has_body() && !has_content_type {
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(DEFAULT_BODY_CONTENT_TYPE),
        );
    }

    Ok(headers)
}

fn encode_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), RequestError> {
    let invalid = |reason: String| RequestError::InvalidHeader {
        name: name.to_string(),
        reason,
    };
    let header_name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|e| invalid(e.to_string()))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| invalid(e.to_string()))?;
    Ok((header_name, header_value))
}

/// Flattens response headers into one entry per name, joining repeated
/// values with `", "` in the order they were received.
fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .keys()
        .map(|name| {
            let joined = headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ");
            (name.as_str().to_string(), joined)
        })
        .collect()
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
