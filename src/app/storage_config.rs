//! Storage location resolution.
//!
//! The durable store path comes from, in order: the first command-line
//! argument, the `RLAYOUT_STORE` environment variable, or the per-user
//! config directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rlayout::{FileStore, KeyValueStore, MemoryStore};

const STORE_ENV: &str = "RLAYOUT_STORE";

/// Where the dashboard keeps its layout preferences.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl StorageConfig {
    /// Resolves the storage path from arguments, environment and platform dirs.
    pub fn resolve(arg: Option<String>) -> Result<Self> {
        let path = match arg.or_else(|| std::env::var(STORE_ENV).ok()) {
            Some(path) => PathBuf::from(path),
            None => FileStore::default_path().context("Cannot locate layout store")?,
        };
        Ok(Self { path })
    }

    /// Opens the configured store.
    ///
    /// Falls back to an in-memory store (preferences last for this session
    /// only) when the file cannot be opened.
    pub fn open(&self) -> Box<dyn KeyValueStore> {
        match FileStore::open(&self.path) {
            Ok(store) => {
                tracing::info!(path = %self.path.display(), "using layout store");
                Box::new(store)
            }
            Err(e) => {
                tracing::warn!(error = %e, "layout store unavailable; preferences will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }
}
