//! Key-value persistence for history blobs.
//!
//! The history lives as one JSON string under one named slot, the way a
//! browser keeps it in local storage. `KeyValueStore` abstracts the slot so
//! the same history logic runs against SQLite, plain files or memory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use skycast_core::StorageError;

/// Result type for key-value operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A store of named string slots.
pub trait KeyValueStore: Send {
    /// Read a slot. Missing slots are `Ok(None)`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Create or overwrite a slot.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-process store. Clones share the same slots.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    /// Returns `StorageError::Unavailable` if the directory can't be created.
    pub fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            StorageError::Unavailable(format!("Failed to create {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::Unavailable(format!("Invalid slot name: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn write_atomic(path: &Path, data: &str) -> StorageResult<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)
        .map_err(|e| StorageError::WriteFailed(format!("{}: {}", tmp.display(), e)))?;
    fs::rename(&tmp, path).map_err(|e| {
        StorageError::WriteFailed(format!(
            "Failed to replace {} with {}: {}",
            path.display(),
            tmp.display(),
            e
        ))
    })
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(format!("{}: {}", path.display(), e))),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        write_atomic(&path, value)
    }
}
