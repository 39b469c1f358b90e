//! File storage behind the `/files/` routes.
//!
//! The router only talks to the [`FileStore`] trait. [`DiskStore`] is used by
//! the server; [`MemoryStore`] keeps everything in a map and backs the tests.

pub mod disk;
pub mod memory;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use disk::DiskStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("no such file: {}", .0.display())]
    NotFound(PathBuf),
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read/write access to files under the configured root.
///
/// Paths handed to a store are already joined with the root and validated by
/// the router.
pub trait FileStore: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Size in bytes of an existing file.
    fn size(&self, path: &Path) -> Result<u64, FileStoreError>;

    fn read(&self, path: &Path) -> Result<Vec<u8>, FileStoreError>;

    /// Creates or truncates `path` and writes `contents` to it.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<(), FileStoreError>;
}
