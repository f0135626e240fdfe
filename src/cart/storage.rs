//! Durable key-value storage seam for cart persistence.
//!
//! Mirrors the browser localStorage contract: one string blob per key,
//! synchronous reads and writes, a single writer per scope.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::errors::AppError;

/// Key-value persistence surface for cart blobs.
pub trait CartStorage {
    /// Read the blob stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, AppError>;
    /// Write the blob under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> Result<(), AppError>;
    /// Delete the blob under `key`; absence is not an error.
    fn remove(&self, key: &str) -> Result<(), AppError>;
}

/// File-backed storage: one JSON file per key under a directory.
///
/// The server gives each client session its own directory, so every scope
/// sees the same fixed key but isolated data, like per-origin localStorage.
/// The directory is created on first write; reads of a scope that never
/// stored anything leave no trace on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, AppError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
