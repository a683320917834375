//! The working request and what can be done with it.
//!
//! A [`Session`] is what a front-end drives: it holds the request currently
//! being edited, sends it, records successful sends in history, and swaps in
//! copies of templates or past requests.

use crate::executor::RequestExecutor;
use crate::models::{RequestSpec, ResponseResult};
use crate::store::{HistoryEntry, RequestStore, StoreError, Template};
use std::sync::Arc;

/// Outcome of [`Session::send`].
#[derive(Debug)]
pub struct Dispatch {
    /// The execution result, always present.
    pub response: ResponseResult,

    /// The history entry written for this send, if one was recorded.
    pub recorded: Option<HistoryEntry>,

    /// Set when recording history failed. The entry is still in memory.
    pub record_error: Option<StoreError>,
}

/// Editor state for one working request.
#[derive(Debug)]
pub struct Session {
    executor: RequestExecutor,
    store: Arc<RequestStore>,
    current: RequestSpec,
}

impl Session {
    pub fn new(executor: RequestExecutor, store: Arc<RequestStore>) -> Self {
        Self {
            executor,
            store,
            current: RequestSpec::default(),
        }
    }

    pub fn store(&self) -> &Arc<RequestStore> {
        &self.store
    }

    pub fn executor(&self) -> &RequestExecutor {
        &self.executor
    }

    /// The request being edited.
    pub fn current(&self) -> &RequestSpec {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut RequestSpec {
        &mut self.current
    }

    /// Replaces the working request, returning the previous one.
    pub fn replace(&mut self, spec: RequestSpec) -> RequestSpec {
        std::mem::replace(&mut self.current, spec)
    }

    /// Sends the working request.
    ///
    /// Results without an error are added to history. Failed requests are
    /// not recorded.
    pub fn send(&self) -> Dispatch {
        let response = self.executor.execute(&self.current);
        if response.is_error() {
            return Dispatch {
                response,
                recorded: None,
                record_error: None,
            };
        }

        match self.store.add_history(&self.current, &response) {
            Ok(entry) => Dispatch {
                response,
                recorded: Some(entry),
                record_error: None,
            },
            Err(e) => {
                log::warn!("Request sent but not recorded: {}", e);
                Dispatch {
                    response,
                    recorded: None,
                    record_error: Some(e),
                }
            }
        }
    }

    /// Makes a copy of template `id` the working request.
    ///
    /// Returns `false` and leaves the working request alone if there is no
    /// such template.
    pub fn load_template(&mut self, id: &str) -> bool {
        match self.store.get_template(id) {
            Some(Template { request, .. }) => {
                self.current = request;
                true
            }
            None => false,
        }
    }

    /// Makes a copy of the request from history entry `id` the working
    /// request.
    pub fn load_history_entry(&mut self, id: &str) -> bool {
        match self.store.get_history_entry(id) {
            Some(HistoryEntry { request, .. }) => {
                self.current = request;
                true
            }
            None => false,
        }
    }

    /// Saves the working request as a template named `name`.
    pub fn save_as_template(&self, name: &str) -> Result<Template, StoreError> {
        self.store.save_template(name, &self.current)
    }
}
