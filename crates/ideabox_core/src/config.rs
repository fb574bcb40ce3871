//! Host-supplied configuration for the core.
//!
//! The core reads no environment variables; hosts build an `IdeaboxConfig`
//! directly or decode one from JSON.

use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::repo::idea_repo::KvIdeaRepository;
use crate::storage::{KeyValueStore, MemoryStore, SqliteStore, StorageResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where persistent state lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageLocation {
    /// SQLite database file, created on first open.
    File { path: PathBuf },
    /// Process-local map; optional byte quota.
    Memory {
        #[serde(default)]
        quota_bytes: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdeaboxConfig {
    pub storage: StorageLocation,
    pub log_level: String,
    /// Absolute log directory; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    /// Write the bundled sample ideas on first access to empty storage.
    pub seed_samples: bool,
}

impl Default for IdeaboxConfig {
    fn default() -> Self {
        Self {
            storage: StorageLocation::Memory { quota_bytes: None },
            log_level: default_log_level().as_str().to_string(),
            log_dir: None,
            seed_samples: true,
        }
    }
}

impl IdeaboxConfig {
    /// Decodes a config; missing fields take their defaults.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Opens the configured store.
    pub fn open_store(&self) -> StorageResult<Box<dyn KeyValueStore>> {
        let store: Box<dyn KeyValueStore> = match &self.storage {
            StorageLocation::File { path } => Box::new(SqliteStore::open(path)?),
            StorageLocation::Memory {
                quota_bytes: Some(quota_bytes),
            } => Box::new(MemoryStore::with_quota(*quota_bytes)),
            StorageLocation::Memory { quota_bytes: None } => Box::new(MemoryStore::new()),
        };
        Ok(store)
    }

    /// Builds an idea repository over `store` honoring `seed_samples`.
    pub fn idea_repository<S: KeyValueStore>(&self, store: S) -> KvIdeaRepository<S> {
        KvIdeaRepository::new(store).with_seed_samples(self.seed_samples)
    }

    /// Starts logging when `log_dir` is set. Returns whether logging is on.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        init_logging(&self.log_level, log_dir)?;
        Ok(true)
    }
}
