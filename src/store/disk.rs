use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::store::{FileStore, FileStoreError};

/// File store backed by the local filesystem.
///
/// Concurrent access to the same file is left to the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl DiskStore {
    pub fn new() -> Self {
        Self
    }
}

fn map_err(path: &Path, source: std::io::Error) -> FileStoreError {
    if source.kind() == ErrorKind::NotFound {
        FileStoreError::NotFound(path.to_path_buf())
    } else {
        FileStoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl FileStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn size(&self, path: &Path) -> Result<u64, FileStoreError> {
        fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| map_err(path, e))
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, FileStoreError> {
        fs::read(path).map_err(|e| map_err(path, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), FileStoreError> {
        fs::write(path, contents).map_err(|e| map_err(path, e))
    }
}
