//! JSON-file backed key-value store.
//!
//! The whole store is one JSON object mapping keys to the raw string values,
//! loaded on open and rewritten on flush.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::{Result, StorageError};
use crate::traits::KeyValueStore;

const APP_DIR: &str = "rlayout";
const FILE_NAME: &str = "layout.json";

/// Durable key-value store persisted as a JSON object on disk.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    data: BTreeMap<String, String>,
    dirty: bool,
}

impl FileStore {
    /// Returns `<config dir>/rlayout/layout.json` for the current user.
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(FILE_NAME))
            .ok_or(StorageError::NoConfigDir)
    }

    /// Opens the store at `path`.
    ///
    /// A missing file yields an empty store. A file that is not a JSON object
    /// of strings is treated as empty too (and replaced on the next flush);
    /// only I/O failures other than "not found" are errors.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&path, &content).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "discarding unreadable layout store");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = data.len(), "opened layout store");
        Ok(Self {
            path,
            data,
            dirty: false,
        })
    }

    fn parse(path: &Path, content: &str) -> Result<BTreeMap<String, String>> {
        serde_json::from_str(content).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true when there are writes not yet flushed to disk.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the store to disk, creating parent directories as needed.
    ///
    /// The file is written to a sibling temporary path and renamed into
    /// place so a crash never leaves a half-written store behind.
    pub fn try_flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source| StorageError::Io { path, source }
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }

        let content = serde_json::to_string_pretty(&self.data).map_err(|source| {
            StorageError::Json {
                path: self.path.clone(),
                source,
            }
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &self.path).map_err(io_err(&self.path))?;

        self.dirty = false;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: String) {
        if self.data.get(key) != Some(&value) {
            self.data.insert(key.to_string(), value);
            self.dirty = true;
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.try_flush() {
            tracing::warn!(error = %e, "failed to flush layout store");
        }
    }
}
