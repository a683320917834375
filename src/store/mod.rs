//! Durable storage for saved templates and request history.
//!
//! [`RequestStore`] keeps both collections in memory behind one
//! reader/writer lock and mirrors each to its own JSON file in the data
//! directory. The files are read once when the store is opened and only
//! written afterwards; every mutation rewrites the whole file before the
//! call returns.
//!
//! # Invariants
//!
//! - Templates are unique by name and kept sorted by name. Saving under an
//!   existing name updates that template and keeps its id.
//! - History is newest-first and never longer than the configured limit
//!   (50 by default); the oldest entries are dropped first.
//! - Every value handed out is an independent copy.
//!
//! # Write failures
//!
//! When writing a file fails, the mutation has already been applied in
//! memory and is not rolled back. The error is returned, and memory stays
//! ahead of disk until the next successful write of that collection.
//!
//! # Example
//!
//! ```no_run
//! use percentman::models::RequestSpec;
//! use percentman::store::{RequestStore, StoreConfig};
//!
//! # fn main() -> Result<(), percentman::store::StoreError> {
//! let store = RequestStore::open(StoreConfig::default())?;
//! let spec = RequestSpec::new("GET", "https://api.example.com/users");
//! let template = store.save_template("List users", &spec)?;
//! assert!(store.template_exists("List users"));
//! assert_eq!(store.get_template(&template.id).map(|t| t.name), Some("List users".to_string()));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod models;
pub mod storage;

pub use error::StoreError;
pub use models::{HistoryEntry, Template};

use crate::config::{CorruptStatePolicy, PercentmanConfig, DEFAULT_HISTORY_LIMIT};
use crate::models::{RequestSpec, ResponseResult};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Maximum number of history entries kept by default.
pub const MAX_HISTORY_ENTRIES: usize = DEFAULT_HISTORY_LIMIT;

/// Settings for opening a [`RequestStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory for the state files. `None` means the per-user data directory.
    pub data_dir: Option<PathBuf>,

    /// History cap. Values below 1 are treated as 1.
    pub history_limit: usize,

    /// How to treat state files that cannot be read or parsed.
    pub corrupt_state: CorruptStatePolicy,
}

impl StoreConfig {
    /// Store rooted at `dir` with default limits.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(dir.into()),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            history_limit: MAX_HISTORY_ENTRIES,
            corrupt_state: CorruptStatePolicy::default(),
        }
    }
}

impl From<&PercentmanConfig> for StoreConfig {
    fn from(config: &PercentmanConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            history_limit: config.history_limit,
            corrupt_state: config.corrupt_state,
        }
    }
}

#[derive(Debug, Default)]
struct Collections {
    templates: Vec<Template>,
    history: Vec<HistoryEntry>,
}

/// Concurrency-safe store of templates and history.
///
/// Share it between threads with `Arc<RequestStore>`. Reads take the shared
/// lock; mutations hold the exclusive lock across both the in-memory change
/// and the file write, so writes never interleave and readers never see a
/// half-applied change.
#[derive(Debug)]
pub struct RequestStore {
    data_dir: PathBuf,
    history_limit: usize,
    inner: RwLock<Collections>,
}

impl RequestStore {
    /// Opens the store, creating the data directory if needed and loading
    /// both collections.
    ///
    /// # Errors
    ///
    /// Fails if the data directory cannot be resolved or created, or if a
    /// state file exists but cannot be read. A state file that does not
    /// parse fails only under [`CorruptStatePolicy::Fail`].
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let data_dir = match config.data_dir {
            Some(dir) => dir,
            None => storage::default_data_dir()?,
        };
        storage::ensure_dir(&data_dir)?;

        let history_limit = config.history_limit.max(1);

        let mut templates: Vec<Template> =
            storage::load_collection(&data_dir.join(storage::TEMPLATES_FILE), config.corrupt_state)?;
        templates.sort_by(|a, b| a.name.cmp(&b.name));

        let mut history: Vec<HistoryEntry> =
            storage::load_collection(&data_dir.join(storage::HISTORY_FILE), config.corrupt_state)?;
        history.truncate(history_limit);

        log::info!(
            "Opened store at {} ({} templates, {} history entries)",
            data_dir.display(),
            templates.len(),
            history.len()
        );

        Ok(Self {
            data_dir,
            history_limit,
            inner: RwLock::new(Collections { templates, history }),
        })
    }

    /// Opens a store rooted at `dir` with default settings.
    pub fn open_in(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open(StoreConfig::in_dir(dir))
    }

    /// Directory holding the state files.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the templates file.
    pub fn templates_path(&self) -> PathBuf {
        self.data_dir.join(storage::TEMPLATES_FILE)
    }

    /// Path of the history file.
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(storage::HISTORY_FILE)
    }

    /// Maximum number of history entries kept.
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    // A panic while holding the lock cannot leave a collection half-edited:
    // each mutation finishes its in-memory change before touching the disk.
    fn read(&self) -> RwLockReadGuard<'_, Collections> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Collections> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // Templates

    /// Returns all templates sorted by name.
    pub fn list_templates(&self) -> Vec<Template> {
        self.read().templates.clone()
    }

    /// Saves `spec` under `name`, updating the existing template of that name
    /// if there is one.
    ///
    /// The store keeps its own copy of `spec`. On a write error the template
    /// is still saved in memory.
    pub fn save_template(&self, name: &str, spec: &RequestSpec) -> Result<Template, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }

        let mut inner = self.write();
        let saved = match inner.templates.iter_mut().find(|t| t.name == name) {
            Some(existing) => {
                existing.request = spec.clone();
                existing.updated_at = Utc::now();
                log::debug!("Updated template {:?} ({})", name, existing.id);
                existing.clone()
            }
            None => {
                let template = Template::new(name, spec.clone());
                log::debug!("Created template {:?} ({})", name, template.id);
                inner.templates.push(template.clone());
                template
            }
        };
        inner.templates.sort_by(|a, b| a.name.cmp(&b.name));

        self.persist_templates(&inner.templates)?;
        Ok(saved)
    }

    /// Deletes the template with `id`. Unknown ids are ignored.
    pub fn delete_template(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.write();
        let Some(index) = inner.templates.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        let removed = inner.templates.remove(index);
        log::debug!("Deleted template {:?} ({})", removed.name, removed.id);

        self.persist_templates(&inner.templates)
    }

    /// Returns `true` if a template with exactly this name exists.
    pub fn template_exists(&self, name: &str) -> bool {
        self.read().templates.iter().any(|t| t.name == name)
    }

    /// Looks up a template by id.
    pub fn get_template(&self, id: &str) -> Option<Template> {
        self.read().templates.iter().find(|t| t.id == id).cloned()
    }

    /// Looks up a template by name.
    pub fn find_template_by_name(&self, name: &str) -> Option<Template> {
        self.read().templates.iter().find(|t| t.name == name).cloned()
    }

    // History

    /// Returns the history, newest first.
    pub fn list_history(&self) -> Vec<HistoryEntry> {
        self.read().history.clone()
    }

    /// Records one execution at the front of the history, dropping the oldest
    /// entries beyond the limit.
    ///
    /// Entries are never deduplicated. On a write error the entry is still
    /// recorded in memory.
    pub fn add_history(
        &self,
        spec: &RequestSpec,
        result: &ResponseResult,
    ) -> Result<HistoryEntry, StoreError> {
        let entry = HistoryEntry::new(spec.clone(), result.clone());

        let mut inner = self.write();
        inner.history.insert(0, entry.clone());
        inner.history.truncate(self.history_limit);

        self.persist_history(&inner.history)?;
        Ok(entry)
    }

    /// Removes every history entry and writes an empty history file.
    pub fn clear_history(&self) -> Result<(), StoreError> {
        let mut inner = self.write();
        inner.history.clear();
        log::debug!("Cleared history");

        self.persist_history(&inner.history)
    }

    /// Looks up a history entry by id.
    pub fn get_history_entry(&self, id: &str) -> Option<HistoryEntry> {
        self.read().history.iter().find(|h| h.id == id).cloned()
    }

    fn persist_templates(&self, templates: &[Template]) -> Result<(), StoreError> {
        storage::write_collection(&self.templates_path(), templates).map_err(|e| {
            log::warn!("Templates kept in memory but not saved: {}", e);
            e
        })
    }

    fn persist_history(&self, history: &[HistoryEntry]) -> Result<(), StoreError> {
        storage::write_collection(&self.history_path(), history).map_err(|e| {
            log::warn!("History kept in memory but not saved: {}", e);
            e
        })
    }
}
