//! Shared utility functions for output formatting

use std::time::SystemTime;

use chrono::{DateTime, Local};

pub const BRANCH: &str = "├── ";
pub const CORNER: &str = "└── ";
pub const VERTICAL: &str = "│   ";
pub const BLANK: &str = "    ";

/// Connector drawn in front of a child.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { CORNER } else { BRANCH }
}

/// Calculate the prefix for the children of an entry.
pub fn continuation_prefix(prefix: &str, is_last: bool) -> String {
    if is_last {
        format!("{}{}", prefix, BLANK)
    } else {
        format!("{}{}", prefix, VERTICAL)
    }
}

/// Format a size in bytes to a compact human-readable string such as `1.5K`.
///
/// Values below one KiB are printed as a bare integer. The precision is picked
/// after rounding: a value that rounds to ten or more drops the decimal, so
/// the result fits a four character column while the scaled value is below
/// one thousand.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    let (value, suffix) = if bytes >= GB {
        (bytes as f64 / GB as f64, "G")
    } else if bytes >= MB {
        (bytes as f64 / MB as f64, "M")
    } else if bytes >= KB {
        (bytes as f64 / KB as f64, "K")
    } else {
        return bytes.to_string();
    };

    if (value * 10.0).round() >= 100.0 {
        format!("{:.0}{}", value, suffix)
    } else {
        format!("{:.1}{}", value, suffix)
    }
}

/// Resolve a uid to a user name, falling back to the number.
pub fn format_owner(uid: u32) -> String {
    let name = uzers::get_user_by_uid(uid)
        .map(|user| user.name().to_string_lossy().into_owned())
        .unwrap_or_else(|| uid.to_string());
    format!("{:<8}", name)
}

/// Numeric group id; names are not looked up.
pub fn format_group(gid: u32) -> String {
    format!("{:<4}", gid)
}

/// Modification time as `Jan 02 15:04` in local time.
pub fn format_mtime(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format("%b %d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0");
        assert_eq!(format_size(1023), "1023");
        assert_eq!(format_size(1536), "1.5K");
        assert_eq!(format_size(10240), "10K");
        assert_eq!(format_size(1024 * 1024 * 3 / 2), "1.5M");
        assert_eq!(format_size(1073741824), "1.0G");
        assert_eq!(format_size(50 * 1073741824), "50G");
    }

    #[test]
    fn test_format_size_rounds_before_choosing_precision() {
        // 9.999K rounds up, so it prints without a decimal
        assert_eq!(format_size(10239), "10K");
        assert_eq!(format_size(10188), "9.9K");
        assert_eq!(format_size(10 * 1024 * 1024 - 1), "10M");
    }

    #[test]
    fn test_format_size_fits_column() {
        let mut samples: Vec<u64> = (1..1000).map(|k| k * 1024 - 1).collect();
        samples.extend((2..1000).map(|k| k * 1024 * 1024 - 1));
        samples.extend((2..1000).map(|k| k * 1024 * 1024 * 1024 - 1));
        samples.extend((0..200_000).step_by(7));
        for bytes in samples {
            let s = format_size(bytes);
            assert!(s.chars().count() <= 4, "{} -> {}", bytes, s);
        }
    }

    #[test]
    fn test_format_size_has_no_suffix_below_kib() {
        for bytes in [1, 10, 999, 1023] {
            let s = format_size(bytes);
            assert!(!s.contains('.'), "{}", s);
            assert!(s.chars().all(|c| c.is_ascii_digit()), "{}", s);
        }
    }

    #[test]
    fn test_continuation_prefix_last_item() {
        assert_eq!(continuation_prefix("", true), "    ");
        assert_eq!(continuation_prefix("│   ", true), "│       ");
    }

    #[test]
    fn test_continuation_prefix_not_last_item() {
        assert_eq!(continuation_prefix("", false), "│   ");
        assert_eq!(continuation_prefix("│   ", false), "│   │   ");
    }

    #[test]
    fn test_connector() {
        assert_eq!(connector(true), "└── ");
        assert_eq!(connector(false), "├── ");
    }

    #[test]
    fn test_group_and_owner_padding() {
        assert_eq!(format_group(7), "7   ");
        assert_eq!(format_group(123456), "123456");
        // uid with no passwd entry falls back to the number
        assert_eq!(format_owner(4_000_000_000), "4000000000");
        assert!(format_owner(0).len() >= 8);
    }

    #[test]
    fn test_format_mtime_shape() {
        let s = format_mtime(SystemTime::UNIX_EPOCH);
        // e.g. "Jan 01 00:00"
        assert_eq!(s.len(), 12);
        assert_eq!(&s[6..7], " ");
        assert_eq!(&s[9..10], ":");
    }
}
