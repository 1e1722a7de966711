//! Merging the canonical export files of several folders.
//!
//! Each folder is expected to hold one export under a fixed name
//! (`result.json` by default). Folders without it contribute nothing; a file
//! that exists but cannot be read or parsed aborts the whole merge.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatmerge::merge_from_folders;
//!
//! let merged = merge_from_folders(&["exports/2025", "exports/2026"])?;
//! println!("Merged {} unique events", merged.len());
//! # Ok::<(), chatmerge::ChatmergeError>(())
//! ```

use std::path::{Path, PathBuf};

use crate::config::MergeConfig;
use crate::error::{ChatmergeError, Result};
use crate::event::{Event, MergedEvents};
use crate::extractor::Extractor;
use crate::merger::{MergeStats, Merger};
use crate::source::{ExportSource, LocalFs};

/// Locates, extracts and merges folder exports.
#[derive(Debug, Clone)]
pub struct FolderMerger<S = LocalFs> {
    source: S,
    extractor: Extractor,
    config: MergeConfig,
}

impl FolderMerger<LocalFs> {
    /// Creates a merger reading from the local file system with defaults.
    pub fn new() -> Self {
        Self::with_source(LocalFs)
    }
}

impl Default for FolderMerger<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ExportSource> FolderMerger<S> {
    /// Creates a merger reading from `source`.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            extractor: Extractor::new(),
            config: MergeConfig::default(),
        }
    }

    /// Sets the extractor used for every file.
    #[must_use]
    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Sets the merge configuration.
    #[must_use]
    pub fn with_config(mut self, config: MergeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Finds the canonical export file of each folder, in folder order.
    pub fn locate_exports<P: AsRef<Path>>(&self, folders: &[P]) -> Result<Vec<PathBuf>> {
        let name = self.config.canonical_filename.as_str();
        let mut files = Vec::with_capacity(folders.len());

        for folder in folders {
            let folder = folder.as_ref();
            match self
                .source
                .locate(folder, name)
                .map_err(|e| ChatmergeError::io(e, folder))?
            {
                Some(path) => files.push(path),
                None => {
                    tracing::debug!(folder = %folder.display(), file = name, "no export file in folder");
                }
            }
        }
        Ok(files)
    }

    /// Reads and parses one export file.
    pub fn extract_file(&self, path: &Path) -> Result<Vec<Event>> {
        let bytes = self
            .source
            .read(path)
            .map_err(|e| ChatmergeError::io(e, path))?;
        self.extractor
            .parse_document(&bytes, path)
            .map_err(|e| e.with_path(path))
    }

    /// Parses every file, keeping input order. Stops at the first failure.
    pub fn extract_all(&self, files: &[PathBuf]) -> Result<Vec<Vec<Event>>> {
        #[cfg(feature = "parallel")]
        {
            if self.config.parallel && files.len() > 1 {
                use rayon::prelude::*;
                return files.par_iter().map(|f| self.extract_file(f)).collect();
            }
        }
        files.iter().map(|f| self.extract_file(f)).collect()
    }

    /// Merges the exports found in `folders`.
    pub fn merge<P: AsRef<Path>>(&self, folders: &[P]) -> Result<MergedEvents> {
        self.merge_with_stats(folders).map(|(merged, _)| merged)
    }

    /// Merges the exports found in `folders` and reports counts.
    pub fn merge_with_stats<P: AsRef<Path>>(&self, folders: &[P]) -> Result<(MergedEvents, MergeStats)> {
        let files = self.locate_exports(folders)?;
        tracing::debug!(folders = folders.len(), files = files.len(), "located export files");

        let sequences = self.extract_all(&files)?;
        Ok(Merger::from_config(&self.config).merge_with_stats(sequences))
    }
}

/// Merges the `result.json` exports of `folders` with default settings.
pub fn merge_from_folders<P: AsRef<Path>>(folders: &[P]) -> Result<MergedEvents> {
    FolderMerger::new().merge(folders)
}
