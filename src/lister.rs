//! File listing through an external enumerator.
//!
//! The scan never walks the filesystem itself. It asks a [`FileLister`] for
//! the relative paths of every regular file under a root, and the production
//! implementation, [`FdLister`], delegates that to the `fd` tool running as a
//! child process.

use crate::output::OutputFormatter;
use indicatif::ProgressBar;
use std::env;
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

/// Executable names tried, in order, when locating the enumerator.
pub const DEFAULT_EXECUTABLES: [&str; 2] = ["fd", "fdfind"];

/// Errors that abort a listing.
#[derive(Debug)]
pub enum ScanError {
    /// None of the candidate executables is on the search path.
    ListerNotFound { names: Vec<String> },
    /// The enumerator process could not be started.
    Spawn {
        program: PathBuf,
        source: io::Error,
    },
    /// A piped stream of the child was not available.
    StreamUnavailable { stream: &'static str },
    /// Reading the enumerator output failed.
    Read { source: io::Error },
    /// Waiting for the enumerator to exit failed.
    Wait { source: io::Error },
    /// The enumerator exited unsuccessfully.
    ListerFailed { status: ExitStatus },
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ListerNotFound { names } => write!(
                f,
                "Failed to find {} on your system. Please ensure it has been installed, and is in your PATH.",
                names.join(" or ")
            ),
            Self::Spawn { program, source } => {
                write!(f, "error starting command {}: {}", program.display(), source)
            }
            Self::StreamUnavailable { stream } => write!(f, "error obtaining {}", stream),
            Self::Read { source } => write!(f, "error reading command output: {}", source),
            Self::Wait { source } => write!(f, "error waiting for command: {}", source),
            Self::ListerFailed { status } => write!(f, "command execution failed: {}", status),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn { source, .. } | Self::Read { source } | Self::Wait { source } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// Result type for listing and scanning.
pub type ScanResult<T> = Result<T, ScanError>;

/// Something that can enumerate the regular files below a root directory.
pub trait FileLister {
    /// Calls `visit` once per file below `root`, with its path relative to
    /// `root`.
    ///
    /// When `extensions` is non-empty only files with one of those extensions
    /// are listed. Returns an error if the listing as a whole failed, even if
    /// some paths were already visited.
    fn for_each_path(
        &self,
        root: &Path,
        extensions: &[String],
        visit: &mut dyn FnMut(&Path),
    ) -> ScanResult<()>;
}

/// [`FileLister`] backed by the `fd` command-line tool.
#[derive(Clone, Debug)]
pub struct FdLister {
    program: PathBuf,
    progress: ProgressBar,
}

impl FdLister {
    /// Uses the enumerator at `program` as-is.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Suspends `progress` while the enumerator's stderr lines are printed.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Locates the first of `names` on the search path.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::ListerNotFound` if none of them is installed.
    pub fn locate<S: AsRef<str>>(names: &[S]) -> ScanResult<Self> {
        find_executable(names)
            .map(Self::new)
            .ok_or_else(|| ScanError::ListerNotFound {
                names: names.iter().map(|n| n.as_ref().to_string()).collect(),
            })
    }
}

impl FileLister for FdLister {
    fn for_each_path(
        &self,
        root: &Path,
        extensions: &[String],
        visit: &mut dyn FnMut(&Path),
    ) -> ScanResult<()> {
        let mut child = Command::new(&self.program)
            .args(build_fd_args(root, extensions))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ScanError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or(ScanError::StreamUnavailable { stream: "stdout" })?;
        let stderr = child
            .stderr
            .take()
            .ok_or(ScanError::StreamUnavailable { stream: "stderr" })?;

        // stderr must be read to EOF on its own thread; closing it early
        // kills the child with SIGPIPE and a full pipe stalls stdout.
        let progress = self.progress.clone();
        let stderr_drain = thread::spawn(move || {
            drain_diagnostics(BufReader::new(stderr), &mut |line| {
                progress.suspend(|| {
                    OutputFormatter::warning(&format!("fd error output: {}", line))
                })
            });
        });

        let read_result = read_lines(BufReader::new(stdout), visit);

        // Reap the child even when reading failed, so it does not linger.
        let wait_result = child.wait();
        let _ = stderr_drain.join();

        read_result.map_err(|e| ScanError::Read { source: e })?;
        let status = wait_result.map_err(|e| ScanError::Wait { source: e })?;
        if !status.success() {
            return Err(ScanError::ListerFailed { status });
        }
        Ok(())
    }
}

/// Feeds each non-empty line of `reader` to `visit` as a path, without its
/// line ending. On unix the raw bytes are kept, so names that are not valid
/// UTF-8 still resolve.
fn read_lines<R: BufRead>(mut reader: R, visit: &mut dyn FnMut(&Path)) -> io::Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(());
        }
        let line = trim_line_ending(&buf);
        if !line.is_empty() {
            visit_bytes(line, visit);
        }
    }
}

/// Hands every line of `reader` to `emit`, decoded lossily, until EOF.
///
/// A read error stops the decoding but the rest of the stream is still
/// consumed, so the writer never sees a closed pipe.
fn drain_diagnostics<R: BufRead>(mut reader: R, emit: &mut dyn FnMut(&str)) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => return,
            Ok(_) => {
                let line = trim_line_ending(&buf);
                if !line.is_empty() {
                    emit(&String::from_utf8_lossy(line));
                }
            }
            Err(_) => {
                let _ = io::copy(&mut reader, &mut io::sink());
                return;
            }
        }
    }
}

fn trim_line_ending(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r'] = line {
        line = rest;
    }
    line
}

#[cfg(unix)]
fn visit_bytes(bytes: &[u8], visit: &mut dyn FnMut(&Path)) {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    visit(Path::new(OsStr::from_bytes(bytes)));
}

#[cfg(not(unix))]
fn visit_bytes(bytes: &[u8], visit: &mut dyn FnMut(&Path)) {
    let line = String::from_utf8_lossy(bytes);
    visit(Path::new(&*line));
}

/// Builds the `fd` argument list for a scan of `root`.
///
/// Files only, hidden files included, ignore files disabled, paths relative
/// to `root`, plus one `-e` per requested extension.
pub fn build_fd_args(root: &Path, extensions: &[String]) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["--type", "f", "-H", "-I", "--full-path", "--base-directory"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(root.as_os_str().to_os_string());

    for ext in extensions {
        args.push(OsString::from("-e"));
        args.push(OsString::from(ext));
    }
    args
}

/// Splits a comma-separated extension list, trimming entries and dropping
/// empty ones.
///
/// # Examples
///
/// ```
/// use extdust::lister::parse_extension_filter;
///
/// assert_eq!(parse_extension_filter(" go, md ,,rs"), vec!["go", "md", "rs"]);
/// assert!(parse_extension_filter("").is_empty());
/// ```
pub fn parse_extension_filter(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .collect()
}

/// Finds the first of `names` that resolves to an executable file.
///
/// Names containing a path separator are checked as given; bare names are
/// looked up in every `PATH` directory.
pub fn find_executable<S: AsRef<str>>(names: &[S]) -> Option<PathBuf> {
    let search_dirs: Vec<PathBuf> = env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).collect())
        .unwrap_or_default();

    for name in names {
        let name = name.as_ref();
        if name.is_empty() {
            continue;
        }

        let as_path = Path::new(name);
        if as_path.components().count() > 1 {
            if is_executable(as_path) {
                return Some(as_path.to_path_buf());
            }
            continue;
        }

        for dir in &search_dirs {
            for candidate in candidate_paths(dir, name) {
                if is_executable(&candidate) {
                    return Some(candidate);
                }
            }
        }
    }
    None
}

#[cfg(windows)]
fn candidate_paths(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name), dir.join(format!("{}.exe", name))]
}

#[cfg(not(windows))]
fn candidate_paths(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn args_as_strings(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().to_string()).collect()
    }

    #[test]
    fn test_build_fd_args_without_filter() {
        let args = build_fd_args(Path::new("/data"), &[]);
        assert_eq!(
            args_as_strings(&args),
            vec!["--type", "f", "-H", "-I", "--full-path", "--base-directory", "/data"]
        );
    }

    #[test]
    fn test_build_fd_args_with_filter() {
        let exts = parse_extension_filter("go, md");
        let args = args_as_strings(&build_fd_args(Path::new("/data"), &exts));
        assert_eq!(&args[7..], &["-e", "go", "-e", "md"]);
    }

    #[test]
    fn test_parse_extension_filter_drops_blanks() {
        assert!(parse_extension_filter(" , ,").is_empty());
        assert_eq!(parse_extension_filter("JPG"), vec!["JPG"]);
    }

    #[test]
    fn test_read_lines_strips_endings_and_blanks() {
        let input = Cursor::new(b"a.txt\r\n\nsub/b.rs\nlast.md".to_vec());
        let mut seen = Vec::new();
        read_lines(input, &mut |path| seen.push(path.to_path_buf())).unwrap();
        assert_eq!(
            seen,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("sub/b.rs"),
                PathBuf::from("last.md")
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_read_lines_keeps_raw_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let input = Cursor::new(b"ok.txt\ncaf\xe9.txt\n".to_vec());
        let mut seen = Vec::new();
        read_lines(input, &mut |path| seen.push(path.to_path_buf())).unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], PathBuf::from("ok.txt"));
        assert_eq!(seen[1].as_os_str().as_bytes(), b"caf\xe9.txt");
    }

    #[test]
    fn test_drain_diagnostics_survives_invalid_utf8() {
        let input = Cursor::new(b"bad \xff name\n\nsecond\r\nthird".to_vec());
        let mut seen = Vec::new();
        drain_diagnostics(input, &mut |line| seen.push(line.to_string()));
        assert_eq!(seen.len(), 3);
        assert!(seen[0].starts_with("bad "));
        assert_eq!(&seen[1..], &["second", "third"]);
    }

    /// Replays its chunks in order, an `Err` chunk failing that one read.
    struct FlakyReader {
        chunks: Vec<io::Result<&'static [u8]>>,
        consumed: usize,
    }

    impl io::Read for FlakyReader {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let bytes = self.chunks.remove(0)?;
            let n = bytes.len().min(out.len());
            out[..n].copy_from_slice(&bytes[..n]);
            if n < bytes.len() {
                self.chunks.insert(0, Ok(&bytes[n..]));
            }
            self.consumed += n;
            Ok(n)
        }
    }

    #[test]
    fn test_drain_diagnostics_consumes_after_error() {
        let reader = FlakyReader {
            chunks: vec![
                Ok(b"first\n"),
                Err(io::Error::other("interrupted stream")),
                Ok(b"rest of the output\n"),
            ],
            consumed: 0,
        };
        let mut reader = BufReader::new(reader);
        let mut seen = Vec::new();
        drain_diagnostics(&mut reader, &mut |line| seen.push(line.to_string()));
        assert_eq!(seen, vec!["first"]);
        assert!(reader.get_ref().chunks.is_empty());
        assert_eq!(reader.get_ref().consumed, 25);
    }

    #[test]
    fn test_find_executable_missing() {
        assert!(find_executable(&["extdust-definitely-not-installed"]).is_none());
        assert!(find_executable::<&str>(&[]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_find_executable_by_path() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let exe = temp_dir.path().join("fake-fd");
        fs::write(&exe, "#!/bin/sh\n").expect("Failed to write script");

        // Not executable yet
        let exe_str = exe.to_string_lossy().to_string();
        assert!(find_executable(&[exe_str.as_str()]).is_none());

        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");
        assert_eq!(
            find_executable(&["extdust-definitely-not-installed", exe_str.as_str()]),
            Some(exe.clone())
        );
    }

    #[test]
    fn test_locate_reports_all_names() {
        let err = FdLister::locate(&["no-such-fd", "no-such-fdfind"]).unwrap_err();
        match &err {
            ScanError::ListerNotFound { names } => {
                assert_eq!(names, &["no-such-fd", "no-such-fdfind"]);
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().contains("no-such-fd or no-such-fdfind"));
    }

    #[test]
    fn test_spawn_failure_is_reported() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let lister = FdLister::new(temp_dir.path().join("missing-binary"));
        let result = lister.for_each_path(temp_dir.path(), &[], &mut |_| {});
        assert!(matches!(result, Err(ScanError::Spawn { .. })));
    }
}
