//! Portal configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no
//! file at all) yields a working in-memory setup with the standard
//! storage key names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use portal_kernel::domain::Collection;

use crate::error::{ConfigError, StoreError};
use crate::store::{DurableStore, FileStore, MemoryStore, DEFAULT_QUOTA_BYTES};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub keys: StorageKeys,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which store implementation to open
    #[serde(default = "default_backend")]
    pub backend: Backend,

    /// Directory for the file backend (the origin scope)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Total bytes allowed across all keys (key + value lengths).
    /// `0` means unlimited.
    #[serde(default = "default_quota")]
    pub quota_bytes: usize,
}

/// Fixed, documented key names of the four persisted collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    #[serde(default = "default_enrolled_key")]
    pub enrolled: String,
    #[serde(default = "default_bookmarks_key")]
    pub bookmarks: String,
    #[serde(default = "default_ratings_key")]
    pub ratings: String,
    #[serde(default = "default_visits_key")]
    pub visits: String,
}

impl StorageKeys {
    pub fn key_for(&self, collection: Collection) -> &str {
        match collection {
            Collection::Enrollments => &self.enrolled,
            Collection::Bookmarks => &self.bookmarks,
            Collection::Ratings => &self.ratings,
            Collection::Visits => &self.visits,
        }
    }
}

// Defaults
fn default_backend() -> Backend { Backend::Memory }
fn default_data_dir() -> PathBuf { PathBuf::from("portal-data") }
fn default_quota() -> usize { DEFAULT_QUOTA_BYTES }
fn default_enrolled_key() -> String { "enrolledCourses".to_string() }
fn default_bookmarks_key() -> String { "bookmarkedResources".to_string() }
fn default_ratings_key() -> String { "courseRatings".to_string() }
fn default_visits_key() -> String { "pageVisits".to_string() }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
            quota_bytes: default_quota(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            enrolled: default_enrolled_key(),
            bookmarks: default_bookmarks_key(),
            ratings: default_ratings_key(),
            visits: default_visits_key(),
        }
    }
}

impl PortalConfig {
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Load `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        if !path.exists() {
            info!(path = %shown, "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: shown.clone(),
            source,
        })?;
        Self::from_toml_str(&content, &shown)
    }
}

impl StorageConfig {
    /// Effective quota, `None` when unlimited.
    pub fn quota(&self) -> Option<usize> {
        (self.quota_bytes > 0).then_some(self.quota_bytes)
    }

    /// Open the configured backend.
    pub fn open_store(&self) -> Result<Box<dyn DurableStore>, StoreError> {
        match self.backend {
            Backend::Memory => Ok(Box::new(match self.quota() {
                Some(q) => MemoryStore::with_quota(q),
                None => MemoryStore::new(),
            })),
            Backend::File => Ok(Box::new(FileStore::open(&self.data_dir, self.quota())?)),
        }
    }
}
