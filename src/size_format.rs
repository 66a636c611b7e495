//! Human-readable byte counts.
//!
//! Sizes are carried as `u64` bytes everywhere and only turned into floating
//! point here, at the display boundary.

const KB: u64 = 1024;
const MB: u64 = KB * 1024;
const GB: u64 = MB * 1024;
const TB: u64 = GB * 1024;

/// Formats a byte count using binary (1024-based) units.
///
/// Picks the largest unit the value reaches and prints two decimals, or the
/// plain integer followed by `bytes` below one kilobyte.
///
/// # Examples
///
/// ```
/// use extdust::size_format::format_size;
///
/// assert_eq!(format_size(512), "512 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    let scaled = |unit: u64| bytes as f64 / unit as f64;

    if bytes >= TB {
        format!("{:.2} TB", scaled(TB))
    } else if bytes >= GB {
        format!("{:.2} GB", scaled(GB))
    } else if bytes >= MB {
        format!("{:.2} MB", scaled(MB))
    } else if bytes >= KB {
        format!("{:.2} KB", scaled(KB))
    } else {
        format!("{} bytes", bytes)
    }
}
