//! Scan driver: turns a file listing into aggregated usage.
//!
//! For every path the lister yields, the driver resolves it against the scan
//! root, looks up its size, classifies its extension and records it in the
//! [`ExtensionStats`] store. Files that cannot be statted are reported and
//! skipped; a failing lister fails the whole scan.

use crate::extension::classify;
use crate::lister::{FileLister, ScanResult, parse_extension_filter};
use crate::output::OutputFormatter;
use crate::stats::ExtensionStats;
use indicatif::ProgressBar;
use std::fs;
use std::path::PathBuf;

/// What to scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Directory the listing starts from.
    pub root: PathBuf,
    /// Extensions passed through to the lister; empty means every file.
    pub extensions: Vec<String>,
}

impl ScanOptions {
    /// Builds options from a root and a comma-separated extension list.
    pub fn new(root: impl Into<PathBuf>, extension_list: &str) -> Self {
        Self {
            root: root.into(),
            extensions: parse_extension_filter(extension_list),
        }
    }
}

/// Outcome of a completed scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Paths received from the lister.
    pub entries_seen: usize,
    /// Paths sized and recorded in the store.
    pub files_recorded: usize,
    /// Paths that could not be statted, with the reason.
    pub skipped_files: Vec<(PathBuf, String)>,
}

impl ScanReport {
    /// Returns true if every listed path was recorded.
    pub fn is_complete_success(&self) -> bool {
        self.skipped_files.is_empty()
    }
}

/// Scans `options.root` through `lister`, recording every file in `stats`.
///
/// `progress` is ticked once per recorded file; pass
/// [`ProgressBar::hidden`] when no spinner is wanted.
///
/// # Errors
///
/// Returns the lister's error if the listing fails. Whatever was recorded in
/// `stats` before the failure is incomplete and should be discarded.
///
/// # Examples
///
/// ```no_run
/// use extdust::lister::FdLister;
/// use extdust::scanner::{ScanOptions, scan};
/// use extdust::stats::ExtensionStats;
/// use indicatif::ProgressBar;
///
/// let lister = FdLister::locate(&["fd", "fdfind"]).unwrap();
/// let mut stats = ExtensionStats::new();
/// let options = ScanOptions::new("/srv/data", "log,gz");
/// let report = scan(&lister, &options, &mut stats, &ProgressBar::hidden()).unwrap();
/// println!("{} files recorded", report.files_recorded);
/// ```
pub fn scan(
    lister: &dyn FileLister,
    options: &ScanOptions,
    stats: &mut ExtensionStats,
    progress: &ProgressBar,
) -> ScanResult<ScanReport> {
    let mut report = ScanReport::default();

    lister.for_each_path(&options.root, &options.extensions, &mut |relative_path| {
        report.entries_seen += 1;
        let file_path = options.root.join(relative_path);

        match fs::metadata(&file_path) {
            Ok(metadata) => {
                let extension = classify(&file_path);
                stats.record(&extension, &file_path, metadata.len());
                report.files_recorded += 1;
                progress.inc(1);
            }
            Err(e) => {
                progress.suspend(|| {
                    OutputFormatter::warning(&format!(
                        "Error statting file {}: {}",
                        file_path.display(),
                        e
                    ))
                });
                report.skipped_files.push((file_path, e.to_string()));
            }
        }
    })?;

    Ok(report)
}
