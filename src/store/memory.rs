use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::store::{FileStore, FileStoreError};

/// In-memory file store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, replacing any previous contents.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.lock().insert(path.into(), contents.into());
    }

    /// Current contents of `path`, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.lock().get(path.as_ref()).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned map is still consistent: every write is a single insert.
    fn lock(&self) -> MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn size(&self, path: &Path) -> Result<u64, FileStoreError> {
        self.lock()
            .get(path)
            .map(|c| c.len() as u64)
            .ok_or_else(|| FileStoreError::NotFound(path.to_path_buf()))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, FileStoreError> {
        self.lock()
            .get(path)
            .cloned()
            .ok_or_else(|| FileStoreError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), FileStoreError> {
        self.lock().insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}
