//! Operator-facing diagnostics and progress.
//!
//! Every message that is not part of the usage report goes through
//! [`OutputFormatter`], so styling stays consistent and the report itself
//! remains plain text.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Styled output for diagnostics and progress.
///
/// - Errors (red with ✗) go to stderr
/// - Warnings (yellow with ⚠) go to stdout
/// - Progress draws on stderr
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extdust::output::OutputFormatter;
    /// OutputFormatter::error("Failed to find fd on your system");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extdust::output::OutputFormatter;
    /// OutputFormatter::warning("Error statting file /tmp/gone.txt: not found");
    /// ```
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Creates a spinner that counts ingested files.
    ///
    /// The spinner draws to stderr and stays hidden when stderr is not a
    /// terminal.
    pub fn create_scan_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.cyan} {pos} files {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}
