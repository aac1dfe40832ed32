//! Durable key-value store: origin-scoped local storage.
//!
//! Two layers:
//!   - `DurableStore`: raw string values, every failure reported as
//!     `StoreError`.
//!   - `DurableStoreExt`: typed JSON `get_or` / `set` on top of any
//!     backend. Reads fall back, writes log and swallow. Nothing
//!     propagates to the caller.
//!
//! Each key is an independent unit. No transactions across keys.
//!
//! Backends:
//!   - `MemoryStore`: in-process map (tests, incognito hosts)
//!   - `FileStore`: one `<key>.json` file per key in a data directory,
//!     written via temp file + fsync + rename

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::StoreError;

/// Browser local storage ceiling per origin.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Raw access to a persistent key-value medium.
pub trait DurableStore {
    /// Read the raw value under `key`. `Ok(None)` if absent.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the raw value under `key`.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Typed, failure-tolerant access layered over any `DurableStore`.
pub trait DurableStoreExt {
    /// Read and deserialize `key`, or return `fallback` on a missing key,
    /// an empty value, a decode failure, or a medium error.
    fn get_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T;

    /// Serialize and write `value`. Failures are logged and swallowed;
    /// the return value reports whether the write reached the medium.
    fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool;
}

impl<S: DurableStore + ?Sized> DurableStoreExt for S {
    fn get_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.read(key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return fallback,
            Err(e) => {
                warn!(key, error = %e, "storage read failed, using fallback");
                return fallback;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(source) => {
                let e = StoreError::Decode {
                    key: key.to_string(),
                    source,
                };
                warn!(key, error = %e, "stored value is corrupt, using fallback");
                fallback
            }
        }
    }

    fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_string(value) {
            Ok(s) => s,
            Err(source) => {
                let e = StoreError::Encode {
                    key: key.to_string(),
                    source,
                };
                error!(key, error = %e, "Storage error");
                return false;
            }
        };

        match self.write(key, &encoded) {
            Ok(()) => {
                debug!(key, bytes = encoded.len(), "flushed");
                true
            }
            Err(e) => {
                error!(key, error = %e, "Storage error");
                false
            }
        }
    }
}

/// Keys are used as file names by `FileStore`, so both backends accept
/// the same restricted alphabet.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' || ch == '.');
    if ok && key != "." && key != ".." {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Quota accounting matches browsers: key length plus value length.
fn check_quota(
    key: &str,
    value: &str,
    used_by_others: usize,
    quota: Option<usize>,
) -> Result<(), StoreError> {
    let Some(limit) = quota else {
        return Ok(());
    };
    let needed = used_by_others + key.len() + value.len();
    if needed > limit {
        return Err(StoreError::QuotaExceeded {
            key: key.to_string(),
            needed,
            limit,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// Non-persistent store. Values live as long as the struct.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            quota: Some(quota),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn used_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl DurableStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        check_quota(key, value, self.used_excluding(key), self.quota)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// Directory-backed store: `<dir>/<key>.json` per key.
///
/// The directory is the origin scope; two stores over the same
/// directory see the same values.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota: Option<usize>,
}

impl FileStore {
    /// Open or create a store rooted at `dir`.
    pub fn open(dir: &Path, quota: Option<usize>) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            quota,
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn used_excluding(&self, key: &str) -> io::Result<usize> {
        let mut used = 0;
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".json") {
                if stem != key {
                    used += stem.len() + entry.metadata()?.len() as usize;
                }
            }
        }
        Ok(used)
    }
}

fn write_synced(path: &Path, value: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(value.as_bytes())?;
    file.sync_all()
}

impl DurableStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        if self.quota.is_some() {
            check_quota(key, value, self.used_excluding(key)?, self.quota)?;
        }

        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        let result = write_synced(&tmp, value).and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = result {
            // No temp file survives a failed write.
            if let Err(cleanup) = fs::remove_file(&tmp) {
                if cleanup.kind() != io::ErrorKind::NotFound {
                    warn!(key, error = %cleanup, "could not remove temp file");
                }
            }
            return Err(e.into());
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
