//! PercentMan: compose, send and inspect HTTP requests.
//!
//! The crate is the core of a manual HTTP client. A user builds a request
//! (method, URL, header rows that can be toggled, raw body), sends it, and
//! looks at the status, headers, timing and body that come back. Requests can
//! be saved as named templates, and every successful send lands in a bounded
//! history. Both collections survive restarts as JSON files in a per-user data
//! directory.
//!
//! # Architecture
//!
//! - **models**: the request and response values passed between components
//! - **executor**: turns a request into one HTTP round trip; never fails
//! - **store**: templates and history, kept in memory and mirrored to disk
//! - **formatter**: JSON pretty-printing and display helpers for responses
//! - **config**: user settings that configure the executor and the store
//! - **session**: the working request and the actions a front-end performs
//!
//! # Usage
//!
//! ```no_run
//! use percentman::config::PercentmanConfig;
//! use percentman::models::{HeaderEntry, RequestSpec};
//! use percentman::{RequestExecutor, RequestStore, Session};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PercentmanConfig::default();
//! let executor = RequestExecutor::new((&config).into())?;
//! let store = Arc::new(RequestStore::open((&config).into())?);
//! let mut session = Session::new(executor, store);
//!
//! *session.current_mut() = RequestSpec::new("POST", "httpbin.org/post")
//!     .with_header(HeaderEntry::new("Accept", "application/json"))
//!     .with_body(r#"{"name": "Ada"}"#);
//!
//! let dispatch = session.send();
//! println!("{}", percentman::formatter::summarize(&dispatch.response));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod executor;
pub mod formatter;
pub mod models;
pub mod session;
pub mod store;

pub use config::PercentmanConfig;
pub use executor::{ExecutionConfig, RequestError, RequestExecutor};
pub use models::{HeaderEntry, RequestSpec, ResponseResult};
pub use session::{Dispatch, Session};
pub use store::{HistoryEntry, RequestStore, StoreConfig, StoreError, Template};

/// Crate version, used in the default `User-Agent`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
