//! File-system access used by the folder merge.
//!
//! [`ExportSource`] is the seam between the merge pipeline and storage.
//! [`LocalFs`] reads the local disk; tests and embedders can provide their
//! own implementation (in-memory archives, unpacked zips, ...).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where export files are read from.
pub trait ExportSource: Send + Sync {
    /// Reads the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Returns the path of `filename` inside `folder`, or `None` when the
    /// folder has no such file.
    ///
    /// A missing folder counts as an empty one.
    fn locate(&self, folder: &Path, filename: &str) -> io::Result<Option<PathBuf>>;
}

/// Reads exports from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl ExportSource for LocalFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn locate(&self, folder: &Path, filename: &str) -> io::Result<Option<PathBuf>> {
        let candidate = folder.join(filename);
        match fs::metadata(&candidate) {
            Ok(meta) if meta.is_file() => Ok(Some(candidate)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
