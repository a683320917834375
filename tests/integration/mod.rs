//! Integration tests module for PercentMan
//!
//! Shared helpers for tests that exercise the executor against local HTTP
//! servers and the store against temporary data directories.

pub mod executor_test;
pub mod session_test;
pub mod store_test;

use percentman::executor::{ExecutionConfig, RequestExecutor};
use percentman::store::RequestStore;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Executor with a short timeout suitable for local servers.
pub fn test_executor() -> RequestExecutor {
    test_executor_with(ExecutionConfig::with_timeout(Duration::from_secs(5)))
}

pub fn test_executor_with(config: ExecutionConfig) -> RequestExecutor {
    RequestExecutor::new(config).expect("Failed to build executor")
}

/// Store in a fresh temporary directory. Keep the `TempDir` alive for the
/// duration of the test.
pub fn temp_store() -> (TempDir, Arc<RequestStore>) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = RequestStore::open_in(dir.path()).expect("Failed to open store");
    (dir, Arc::new(store))
}
