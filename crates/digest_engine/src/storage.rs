//! Key-value slots in the spirit of browser local storage.
//!
//! Values are opaque strings. [`FileStorage`] keeps one file per key and
//! replaces it atomically on every write; [`MemoryStorage`] is the in-process
//! stand-in used by tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::{PersistError, SlotWriter};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),
    #[error("failed to read slot {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Write(#[from] PersistError),
}

pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    writer: SlotWriter,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            writer: SlotWriter::new(dir.into()),
        }
    }

    pub fn dir(&self) -> &Path {
        self.writer.dir()
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.dir().join(slot_filename(key)?))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let filename = slot_filename(key)?;
        self.writer.replace(&filename, value)?;
        Ok(())
    }
}

fn slot_filename(key: &str) -> Result<String, StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(format!("{key}.json"))
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage.insert(key, value);
        storage
    }

    fn insert(&self, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .items
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value);
        Ok(())
    }
}
