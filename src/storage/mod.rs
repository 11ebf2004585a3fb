//! Durable key-value storage backends and typed settings helpers.

mod error;
mod file_store;
mod memory;
pub mod settings;

pub use error::{Result, StorageError};
pub use file_store::FileStore;
pub use memory::{MemoryStore, SharedMemoryStore};
pub use settings::{load_setting, load_setting_or, save_setting, try_load_setting};
