//! Report and scanner defaults loaded from TOML.
//!
//! Command-line flags always win; the configuration file only changes what
//! the report looks like when a flag is not given.
//!
//! # Configuration File Format
//!
//! ```toml
//! [display]
//! limit = 100
//! sort_by_name = false
//! ascending = false
//! show_total = false
//!
//! [scanner]
//! executables = ["fd", "fdfind"]
//! ```
//!
//! Every section and key is optional.

use crate::lister::DEFAULT_EXECUTABLES;
use crate::report::{DEFAULT_LIMIT, DisplayOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = ".extdustrc.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// The display limit must list at least one entry.
    InvalidLimit(usize),
    /// The scanner section lists no executable names.
    NoExecutables,
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidLimit(limit) => {
                write!(f, "Invalid display limit {}: expected at least 1", limit)
            }
            ConfigError::NoExecutables => {
                write!(f, "Invalid configuration: scanner.executables is empty")
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report layout defaults.
    #[serde(default)]
    pub display: DisplaySettings,

    /// Enumerator settings.
    #[serde(default)]
    pub scanner: ScannerSettings,
}

/// Default report layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Maximum entries per detail block.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Order extensions by name.
    #[serde(default)]
    pub sort_by_name: bool,

    /// Smallest first instead of largest first.
    #[serde(default)]
    pub ascending: bool,

    /// Always print the grand total.
    #[serde(default)]
    pub show_total: bool,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            sort_by_name: false,
            ascending: false,
            show_total: false,
        }
    }
}

/// Which enumerator executables to look for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScannerSettings {
    /// Executable names tried in order.
    #[serde(default = "default_executables")]
    pub executables: Vec<String>,
}

fn default_executables() -> Vec<String> {
    DEFAULT_EXECUTABLES.iter().map(|name| name.to_string()).collect()
}

impl Default for ScannerSettings {
    fn default() -> Self {
        Self {
            executables: default_executables(),
        }
    }
}

impl ReportConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.extdustrc.toml` in the current directory
    /// 3. Look for `~/.config/extdust/config.toml` in home directory
    /// 4. Fall back to default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly provided file cannot be read, or if
    /// any file found is invalid.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("extdust")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if TOML parsing fails.
    /// Returns `ConfigError::IoError` if file cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.display.limit == 0 {
            return Err(ConfigError::InvalidLimit(self.display.limit));
        }
        if self.scanner.executables.iter().all(|name| name.trim().is_empty()) {
            return Err(ConfigError::NoExecutables);
        }
        Ok(())
    }

    /// Display options implied by the file alone.
    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            limit: self.display.limit,
            sort_by_name: self.display.sort_by_name,
            ascending: self.display.ascending,
            show_total: self.display.show_total,
            ..DisplayOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.display.limit, DEFAULT_LIMIT);
        assert_eq!(config.scanner.executables, vec!["fd", "fdfind"]);
        assert_eq!(config.display_options(), DisplayOptions::default());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ReportConfig::parse("").unwrap();
        assert_eq!(config, ReportConfig::default());
    }

    #[test]
    fn test_partial_display_section() {
        let config = ReportConfig::parse("[display]\nshow_total = true\nlimit = 5\n").unwrap();
        let options = config.display_options();
        assert!(options.show_total);
        assert_eq!(options.limit, 5);
        assert!(!options.sort_by_name);
        assert!(!options.show_files);
        assert_eq!(config.scanner, ScannerSettings::default());
    }

    #[test]
    fn test_custom_executables() {
        let config =
            ReportConfig::parse("[scanner]\nexecutables = [\"/opt/fd/bin/fd\"]\n").unwrap();
        assert_eq!(config.scanner.executables, vec!["/opt/fd/bin/fd"]);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let result = ReportConfig::parse("[display]\nlimit = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidLimit(0))));
    }

    #[test]
    fn test_empty_executables_rejected() {
        let result = ReportConfig::parse("[scanner]\nexecutables = []\n");
        assert!(matches!(result, Err(ConfigError::NoExecutables)));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = ReportConfig::parse("[display\nlimit = ");
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));

        let result = ReportConfig::parse("[display]\nlimit = \"many\"\n");
        assert!(matches!(result, Err(ConfigError::ConfigInvalid(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("extdust.toml");
        fs::write(&path, "[display]\nsort_by_name = true\n").expect("Failed to write config");

        let config = ReportConfig::load(Some(&path)).unwrap();
        assert!(config.display.sort_by_name);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nope.toml");

        let result = ReportConfig::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(p)) if p == path));
    }
}
