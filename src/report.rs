//! Text report over aggregated usage.
//!
//! The report has two parts:
//! - an optional detail block listing, per extension, its largest files
//!   and/or folders,
//! - a summary block with one line per extension and an optional grand total.
//!
//! Rendering is pure: it reads an [`ExtensionStats`] and returns the text.

use crate::size_format::format_size;
use crate::stats::{ExtensionStats, FileRecord};
use std::path::Path;

/// Default number of entries listed per detail block.
pub const DEFAULT_LIMIT: usize = 100;

const BRANCH: &str = "├──";
const LAST_BRANCH: &str = "└──";
const EXTENSION_SEPARATOR: &str = "_____________";
const SUMMARY_BORDER: &str = "==================================";

/// How the report is laid out and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayOptions {
    /// List individual files per extension.
    pub show_files: bool,
    /// List folder totals per extension.
    pub show_folders: bool,
    /// Maximum entries per file or folder list.
    pub limit: usize,
    /// Order extensions by name instead of size.
    pub sort_by_name: bool,
    /// Smallest first instead of largest first.
    pub ascending: bool,
    /// Append the sum of all extensions to the summary.
    pub show_total: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_files: false,
            show_folders: false,
            limit: DEFAULT_LIMIT,
            sort_by_name: false,
            ascending: false,
            show_total: false,
        }
    }
}

impl DisplayOptions {
    /// Returns true if the detail block is part of the report.
    pub fn shows_details(&self) -> bool {
        self.show_files || self.show_folders
    }
}

/// Sorts `items` by size, largest first unless `ascending`.
///
/// The sort is stable, so equal sizes keep their incoming order.
fn sort_by_size<T>(items: &mut [T], ascending: bool, size_of: impl Fn(&T) -> u64) {
    if ascending {
        items.sort_by(|a, b| size_of(a).cmp(&size_of(b)));
    } else {
        items.sort_by(|a, b| size_of(b).cmp(&size_of(a)));
    }
}

/// Returns the extension keys in report order.
///
/// Name ordering, when requested, only applies here; file and folder lists
/// are always ordered by size.
pub fn sorted_extensions<'a>(
    stats: &'a ExtensionStats,
    options: &DisplayOptions,
) -> Vec<&'a str> {
    let mut extensions: Vec<&str> = stats.sizes().keys().map(String::as_str).collect();

    if options.sort_by_name {
        extensions.sort_unstable();
    } else {
        sort_by_size(&mut extensions, options.ascending, |ext| {
            stats.total_for(ext).unwrap_or(0)
        });
    }
    extensions
}

/// Returns up to `options.limit` files of `extension`, ordered by size.
pub fn top_files<'a>(
    stats: &'a ExtensionStats,
    extension: &str,
    options: &DisplayOptions,
) -> Vec<&'a FileRecord> {
    let mut files: Vec<&FileRecord> = stats.files_for(extension).iter().collect();
    sort_by_size(&mut files, options.ascending, |file| file.size);
    files.truncate(options.limit);
    files
}

/// Returns up to `options.limit` folders of `extension` with their totals,
/// ordered by size.
pub fn top_folders<'a>(
    stats: &'a ExtensionStats,
    extension: &str,
    options: &DisplayOptions,
) -> Vec<(&'a Path, u64)> {
    let mut folders: Vec<(&Path, u64)> = stats
        .folders_for(extension)
        .map(|folders| {
            folders
                .iter()
                .map(|(folder, size)| (folder.as_path(), *size))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    sort_by_size(&mut folders, options.ascending, |(_, size)| *size);
    folders.truncate(options.limit);
    folders
}

/// Renders the full report.
///
/// An empty store renders as the single line `No files found.`.
///
/// # Examples
///
/// ```
/// use extdust::report::{DisplayOptions, render};
/// use extdust::stats::ExtensionStats;
/// use std::path::Path;
///
/// let mut stats = ExtensionStats::new();
/// stats.record("md", Path::new("/docs/README.md"), 500);
///
/// let text = render(&stats, &DisplayOptions::default());
/// assert!(text.contains("MD: 500 bytes"));
/// ```
pub fn render(stats: &ExtensionStats, options: &DisplayOptions) -> String {
    if stats.is_empty() {
        return "No files found.\n".to_string();
    }

    let extensions = sorted_extensions(stats, options);
    let mut lines = Vec::new();

    if options.shows_details() {
        render_details(&mut lines, stats, &extensions, options);
        lines.push(String::new());
    }
    render_summary(&mut lines, stats, &extensions, options);

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn render_details(
    lines: &mut Vec<String>,
    stats: &ExtensionStats,
    extensions: &[&str],
    options: &DisplayOptions,
) {
    lines.push("Storage Usage Per Extension:".to_string());

    for (index, extension) in extensions.iter().enumerate() {
        let label = extension.to_uppercase();
        let total = match stats.total_for(extension) {
            Some(total) if !stats.files_for(extension).is_empty() => total,
            _ => {
                lines.push(format!("{}: No files found.", label));
                continue;
            }
        };
        lines.push(format!("{}: {}", label, format_size(total)));

        if options.show_files {
            let files = top_files(stats, extension, options);
            push_tree(
                lines,
                files.iter().map(|file| (file.path.as_path(), file.size)),
            );
        }

        if options.show_folders {
            lines.push(String::new());
            lines.push("Folders:".to_string());
            push_tree(lines, top_folders(stats, extension, options).into_iter());
        }

        if index + 1 < extensions.len() {
            lines.push(EXTENSION_SEPARATOR.to_string());
            lines.push(String::new());
        }
    }
}

/// Pushes one tree line per entry, closing the list with the last-branch glyph.
fn push_tree<'a>(
    lines: &mut Vec<String>,
    entries: impl ExactSizeIterator<Item = (&'a Path, u64)>,
) {
    let count = entries.len();
    for (i, (path, size)) in entries.enumerate() {
        let glyph = if i + 1 == count { LAST_BRANCH } else { BRANCH };
        lines.push(format!("{} {} ({})", glyph, path.display(), format_size(size)));
    }
}

fn render_summary(
    lines: &mut Vec<String>,
    stats: &ExtensionStats,
    extensions: &[&str],
    options: &DisplayOptions,
) {
    lines.push(SUMMARY_BORDER.to_string());
    lines.push(" Summary: Storage per Extension ".to_string());
    lines.push(SUMMARY_BORDER.to_string());
    for extension in extensions {
        lines.push(format!(
            "{}: {}",
            extension.to_uppercase(),
            format_size(stats.total_for(extension).unwrap_or(0))
        ));
    }
    lines.push(SUMMARY_BORDER.to_string());

    if options.show_total {
        lines.push(format!("Total : {}", format_size(stats.grand_total())));
    }
}
