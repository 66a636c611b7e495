//! extdust - disk usage per file extension
//!
//! This library lists the files below a directory through an external
//! enumerator (`fd`), groups their sizes by extension, and renders a text
//! report with optional per-file and per-folder breakdowns.

pub mod cli;
pub mod config;
pub mod extension;
pub mod lister;
pub mod output;
pub mod report;
pub mod scanner;
pub mod size_format;
pub mod stats;

pub use config::{ConfigError, ReportConfig};
pub use extension::{NO_EXTENSION, classify};
pub use lister::{FdLister, FileLister, ScanError, ScanResult};
pub use report::{DisplayOptions, render};
pub use scanner::{ScanOptions, ScanReport, scan};
pub use size_format::format_size;
pub use stats::{ExtensionStats, FileRecord};

pub use cli::{Cli, run_cli};
