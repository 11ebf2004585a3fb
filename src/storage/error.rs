use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by durable storage backends.
///
/// The layout store itself never surfaces these; they reach callers only
/// through backend-specific entry points such as [`FileStore::open`].
///
/// [`FileStore::open`]: super::FileStore::open
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed storage file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No configuration directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, StorageError>;
