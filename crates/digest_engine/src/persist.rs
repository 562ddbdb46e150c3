//! Durable writes for storage slot files.
//!
//! Each slot is replaced whole: the new value goes to a hidden temp file next
//! to the slot and is renamed over it, so a reader sees the old array or the
//! new one and never a truncated mix.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::Builder;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("data directory {path:?} is unusable: {reason}")]
    DataDir { path: PathBuf, reason: String },
    #[error("failed to write slot file: {0}")]
    Io(#[from] io::Error),
}

/// Creates the data directory if needed and checks it is a directory.
pub fn ensure_data_dir(dir: &Path) -> Result<(), PersistError> {
    let unusable = |reason: String| PersistError::DataDir {
        path: dir.to_path_buf(),
        reason,
    };
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(unusable("not a directory".to_string())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir).map_err(|err| unusable(err.to_string()))
        }
        Err(err) => Err(unusable(err.to_string())),
    }
}

/// Replaces slot files inside one data directory.
#[derive(Debug, Clone)]
pub struct SlotWriter {
    dir: PathBuf,
}

impl SlotWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `value` to `{dir}/{slot_file}` and returns the slot path.
    ///
    /// The temp file is named `.{slot_file}.*.tmp` so an interrupted write
    /// never looks like a slot.
    pub fn replace(&self, slot_file: &str, value: &str) -> Result<PathBuf, PersistError> {
        ensure_data_dir(&self.dir)?;

        let target = self.dir.join(slot_file);
        let mut staged = Builder::new()
            .prefix(&format!(".{slot_file}."))
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        staged.write_all(value.as_bytes())?;
        staged.as_file_mut().sync_all()?;

        staged.persist(&target).map_err(|err| PersistError::Io(err.error))?;
        Ok(target)
    }
}
