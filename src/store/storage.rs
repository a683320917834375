//! On-disk persistence for store collections.
//!
//! Each collection lives in its own pretty-printed JSON file. Writes replace
//! the whole file by writing `<file>.tmp` and renaming it over the target, so
//! a crash mid-write leaves either the old or the new contents.

use super::error::StoreError;
use crate::config::CorruptStatePolicy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Name of the per-user application directory.
pub const APP_DIR_NAME: &str = "percentman";

/// File holding saved templates.
pub const TEMPLATES_FILE: &str = "templates.json";

/// File holding request history.
pub const HISTORY_FILE: &str = "history.json";

/// Resolves the per-user data directory.
///
/// Uses the platform data directory (e.g. `~/.local/share/percentman`),
/// falling back to `~/.percentman` when only a home directory is known.
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    if let Some(dir) = dirs::data_dir() {
        return Ok(dir.join(APP_DIR_NAME));
    }
    dirs::home_dir()
        .map(|home| home.join(format!(".{}", APP_DIR_NAME)))
        .ok_or(StoreError::NoDataDir)
}

/// Creates `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

/// Loads a JSON array from `path`.
///
/// A missing file is an empty collection. A file that exists but cannot be
/// read is always an error: starting empty would let the next write replace
/// it. What happens with a file that was read but does not parse depends on
/// `policy`: `Fail` returns the error, `StartEmpty` moves the file to
/// `<file>.corrupt` and returns an empty collection. If that move fails the
/// parse error is returned instead.
pub fn load_collection<T: DeserializeOwned>(
    path: &Path,
    policy: CorruptStatePolicy,
) -> Result<Vec<T>, StoreError> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_slice::<Option<Vec<T>>>(&data) {
        // `null` is what an empty collection looked like in older files.
        Ok(items) => Ok(items.unwrap_or_default()),
        Err(source) => {
            let err = StoreError::Parse {
                path: path.to_path_buf(),
                source,
            };
            set_aside(err, path, policy)
        }
    }
}

fn set_aside<T>(
    err: StoreError,
    path: &Path,
    policy: CorruptStatePolicy,
) -> Result<Vec<T>, StoreError> {
    if policy == CorruptStatePolicy::Fail {
        return Err(err);
    }

    let backup = corrupt_backup_path(path);
    if let Err(e) = fs::rename(path, &backup) {
        log::warn!("Could not move {} aside: {}", path.display(), e);
        return Err(err);
    }
    log::warn!("{}; moved to {} and starting empty", err, backup.display());
    Ok(Vec::new())
}

/// Where an unparsable state file is moved to.
pub fn corrupt_backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

/// Serializes `items` as indented JSON and replaces the file at `path`.
pub fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(items)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let written = write_file(&tmp_path, &data).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    log::debug!("Wrote {} records to {}", items.len(), path.display());
    Ok(())
}

fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
