//! Extension classification for grouping files into usage buckets.
//!
//! Every scanned path maps to exactly one bucket: its normalized suffix, or
//! the shared [`NO_EXTENSION`] bucket when the suffix does not look like a
//! real file type (version numbers, hashes, long compound suffixes).
//!
//! # Examples
//!
//! ```
//! use extdust::extension::{classify, NO_EXTENSION};
//!
//! assert_eq!(classify("src/main.go"), "go");
//! assert_eq!(classify("backup.tar.gz"), "gz");
//! assert_eq!(classify("README"), NO_EXTENSION);
//! assert_eq!(classify("build.123"), NO_EXTENSION);
//! ```

use std::path::Path;

/// Bucket name for files without a usable extension.
pub const NO_EXTENSION: &str = "no extension";

/// Longest suffix still treated as a real extension.
pub const MAX_EXTENSION_LEN: usize = 4;

/// Returns the extension bucket for `file_path`.
///
/// The candidate is whatever follows the last `.` of the base name, so
/// dotfiles such as `.vim` yield `vim`. It is accepted only when it is at most
/// [`MAX_EXTENSION_LEN`] characters, entirely letters and digits, and has at
/// least one letter; accepted suffixes are lower-cased.
pub fn classify<P: AsRef<Path>>(file_path: P) -> String {
    let file_name = match file_path.as_ref().file_name() {
        Some(name) => name.to_string_lossy(),
        None => return NO_EXTENSION.to_string(),
    };

    let suffix = match file_name.rfind('.') {
        Some(dot) => &file_name[dot + 1..],
        None => return NO_EXTENSION.to_string(),
    };

    if is_standard_extension(suffix) {
        suffix.to_lowercase()
    } else {
        NO_EXTENSION.to_string()
    }
}

/// Checks whether a raw suffix (without the dot) qualifies as an extension.
pub fn is_standard_extension(suffix: &str) -> bool {
    if suffix.is_empty() || suffix.chars().count() > MAX_EXTENSION_LEN {
        return false;
    }

    let mut has_letter = false;
    for c in suffix.chars() {
        if c.is_alphabetic() {
            has_letter = true;
        } else if !c.is_numeric() {
            return false;
        }
    }
    has_letter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_simple_extension() {
        assert_eq!(classify("a.go"), "go");
        assert_eq!(classify("/var/log/syslog.txt"), "txt");
    }

    #[test]
    fn test_classify_uses_last_suffix() {
        assert_eq!(classify("archive.tar.gz"), "gz");
        assert_eq!(classify("archive.tar.gz.1"), NO_EXTENSION);
    }

    #[test]
    fn test_classify_lowercases() {
        assert_eq!(classify("PHOTO.JPG"), "jpg");
        assert_eq!(classify("Notes.Md"), "md");
    }

    #[test]
    fn test_classify_missing_or_empty_suffix() {
        assert_eq!(classify("README"), NO_EXTENSION);
        assert_eq!(classify("a."), NO_EXTENSION);
        assert_eq!(classify(""), NO_EXTENSION);
        assert_eq!(classify("/"), NO_EXTENSION);
    }

    #[test]
    fn test_classify_only_looks_at_base_name() {
        assert_eq!(classify("project.v2/Makefile"), NO_EXTENSION);
        assert_eq!(classify("dir.d/file.rs"), "rs");
    }

    #[test]
    fn test_classify_dotfiles() {
        assert_eq!(classify(".vim"), "vim");
        assert_eq!(classify("home/.bashrc"), NO_EXTENSION);
    }

    #[test]
    fn test_classify_rejects_digit_only_suffix() {
        assert_eq!(classify("file.123"), NO_EXTENSION);
        assert_eq!(classify("log.1"), NO_EXTENSION);
        assert_eq!(classify("video.mp4"), "mp4");
        assert_eq!(classify("audio.3gp"), "3gp");
    }

    #[test]
    fn test_classify_length_ceiling() {
        assert_eq!(classify("config.yaml"), "yaml");
        assert_eq!(classify("photo.jpeg"), "jpeg");
        assert_eq!(classify("page.xhtml"), NO_EXTENSION);
        assert_eq!(classify("state.json5"), NO_EXTENSION);
    }

    #[test]
    fn test_classify_rejects_punctuation() {
        assert_eq!(classify("file.c++"), NO_EXTENSION);
        assert_eq!(classify("file.a-b"), NO_EXTENSION);
        assert_eq!(classify("file.a b"), NO_EXTENSION);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let path = "some/deep/path/report.PDF";
        let first = classify(path);
        for _ in 0..10 {
            assert_eq!(classify(path), first);
        }
    }

    #[test]
    fn test_is_standard_extension() {
        assert!(is_standard_extension("rs"));
        assert!(is_standard_extension("h264"));
        assert!(!is_standard_extension(""));
        assert!(!is_standard_extension("0001"));
        assert!(!is_standard_extension("tar.gz"));
    }
}
