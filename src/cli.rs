//! Command-line interface module for extdust.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Merging flags with configuration file defaults
//! - Locating the file enumerator
//! - Scan and report orchestration

use crate::config::ReportConfig;
use crate::lister::{FdLister, FileLister, ScanResult};
use crate::output::OutputFormatter;
use crate::report::{DisplayOptions, render};
use crate::scanner::{ScanOptions, scan};
use crate::stats::ExtensionStats;
use clap::Parser;
use clap::builder::{OsStringValueParser, TypedValueParser};
use indicatif::ProgressBar;
use std::path::PathBuf;

/// Search for files and report the disk space used per extension.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "extdust",
    version,
    about = "Search for files with specific extensions and calculate total size per extension",
    long_about = "A simple CLI tool to search for files with given extensions starting from a \
                  specified path and display their total size per extension, with optional \
                  file or folder details."
)]
pub struct Cli {
    /// Path to search (default: current directory)
    #[arg(short, long, value_parser = OsStringValueParser::new().map(PathBuf::from))]
    pub path: Option<PathBuf>,

    /// Comma-separated file extensions to search for
    #[arg(short, long, default_value = "")]
    pub ext: String,

    /// Show file details per extension
    #[arg(short = 'f', long = "files")]
    pub files: bool,

    /// Show folder details per extension
    #[arg(short = 'd', long = "dirs")]
    pub dirs: bool,

    /// Limit the number of results displayed [default: 100]
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Sort by size, smallest first (default: largest first)
    #[arg(short = 's', long = "size")]
    pub ascending: bool,

    /// Sort summary by extension name
    #[arg(short = 'n', long = "name")]
    pub sort_by_name: bool,

    /// Show total size of all extensions combined
    #[arg(short = 't', long = "total")]
    pub total: bool,

    /// Configuration file (default: ./.extdustrc.toml, then ~/.config/extdust/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Combines the flags with configuration defaults.
    ///
    /// Flags can switch behaviors on but never off; `--limit` replaces the
    /// configured limit.
    pub fn display_options(&self, config: &ReportConfig) -> DisplayOptions {
        let base = config.display_options();
        DisplayOptions {
            show_files: self.files,
            show_folders: self.dirs,
            limit: self.limit.unwrap_or(base.limit),
            sort_by_name: self.sort_by_name || base.sort_by_name,
            ascending: self.ascending || base.ascending,
            show_total: self.total || base.show_total,
        }
    }

    /// Resolves the scan root, defaulting to the current directory when no
    /// path or an empty one was given.
    pub fn scan_root(&self) -> Result<PathBuf, String> {
        match self.path.as_ref().filter(|p| !p.as_os_str().is_empty()) {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir()
                .map_err(|e| format!("Error getting current directory: {}", e)),
        }
    }
}

/// Runs the CLI application with parsed arguments.
///
/// Preconditions are checked in order (working directory, configuration,
/// enumerator) before anything is scanned. On success the report is printed
/// to stdout.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use extdust::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["extdust", "--path", "/var/log", "--total"]);
/// match run_cli(&cli) {
///     Ok(()) => {}
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<(), String> {
    let root = cli.scan_root()?;

    let config = ReportConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;

    let lister = FdLister::locate(&config.scanner.executables).map_err(|e| e.to_string())?;

    let scan_options = ScanOptions::new(root, &cli.ext);
    let display_options = cli.display_options(&config);

    let spinner = OutputFormatter::create_scan_spinner();
    spinner.set_message(format!("in {}", scan_options.root.display()));
    let lister = lister.with_progress(spinner.clone());
    let result = scan_and_render(&lister, &scan_options, &display_options, &spinner);
    spinner.finish_and_clear();

    let report = result.map_err(|e| e.to_string())?;
    print!("{}", report);
    Ok(())
}

/// Scans with `lister` and renders the report.
///
/// Nothing is rendered if the scan fails, so partial results never reach the
/// operator.
///
/// # Errors
///
/// Returns the scan error if the listing failed.
pub fn scan_and_render(
    lister: &dyn FileLister,
    scan_options: &ScanOptions,
    display_options: &DisplayOptions,
    progress: &ProgressBar,
) -> ScanResult<String> {
    let mut stats = ExtensionStats::new();
    let scan_report = scan(lister, scan_options, &mut stats, progress)?;

    if !scan_report.is_complete_success() {
        progress.suspend(|| {
            OutputFormatter::warning(&format!(
                "{} of {} listed files could not be read and were skipped",
                scan_report.skipped_files.len(),
                scan_report.entries_seen
            ));
        });
    }

    Ok(render(&stats, display_options))
}
