//! Per-extension disk usage aggregation.
//!
//! [`ExtensionStats`] keeps three views of the same data, all keyed by
//! extension bucket:
//! - the total number of bytes,
//! - every file that contributed to it,
//! - the bytes contributed by each containing folder.
//!
//! The store only grows; entries are never removed once recorded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single file and its size in bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Full path of the file (scan root joined with the listed path).
    pub path: PathBuf,
    /// Size of the file in bytes.
    pub size: u64,
}

/// Aggregated usage for one scan, keyed by extension bucket.
#[derive(Debug, Clone, Default)]
pub struct ExtensionStats {
    sizes: BTreeMap<String, u64>,
    files: BTreeMap<String, Vec<FileRecord>>,
    folders: BTreeMap<String, BTreeMap<PathBuf, u64>>,
}

impl ExtensionStats {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one file under `extension`.
    ///
    /// Adds the size to the extension total, appends a [`FileRecord`], and
    /// adds the size to the total of the file's parent directory.
    pub fn record(&mut self, extension: &str, file_path: &Path, size: u64) {
        *self.sizes.entry(extension.to_string()).or_insert(0) += size;

        self.files
            .entry(extension.to_string())
            .or_default()
            .push(FileRecord {
                path: file_path.to_path_buf(),
                size,
            });

        let folder = file_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        *self
            .folders
            .entry(extension.to_string())
            .or_default()
            .entry(folder)
            .or_insert(0) += size;
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Number of distinct extension buckets.
    pub fn extension_count(&self) -> usize {
        self.sizes.len()
    }

    /// Total bytes per extension.
    pub fn sizes(&self) -> &BTreeMap<String, u64> {
        &self.sizes
    }

    /// Total bytes recorded for one extension, if any.
    pub fn total_for(&self, extension: &str) -> Option<u64> {
        self.sizes.get(extension).copied()
    }

    /// Files recorded for one extension, in ingestion order.
    pub fn files_for(&self, extension: &str) -> &[FileRecord] {
        self.files.get(extension).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Folder totals for one extension.
    pub fn folders_for(&self, extension: &str) -> Option<&BTreeMap<PathBuf, u64>> {
        self.folders.get(extension)
    }

    /// Sum of every extension total.
    pub fn grand_total(&self) -> u64 {
        self.sizes.values().sum()
    }
}
