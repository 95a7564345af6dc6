//! Tree formatting and display
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `color` - File-category color classification
//! - `utils` - Size/owner/time formatting and tree glyphs
//! - `tree` - Text tree formatter
//! - `json` - JSON output

mod color;
mod config;
mod json;
mod tree;
mod utils;

// Re-export public types and functions
pub use color::{Style, classify, colorize};
pub use config::{Columns, OutputConfig, SizeFormat};
pub use json::print_json;
pub use tree::TreeFormatter;
pub use utils::{continuation_prefix, format_group, format_mtime, format_owner, format_size};

/// Footer summarizing a listing, e.g. `3 directories, 7 files`.
pub fn report(dirs: usize, files: usize, dirs_only: bool) -> String {
    let mut line = format!("{} {}", dirs, plural(dirs, "directory", "directories"));
    if !dirs_only {
        line.push_str(&format!(", {} {}", files, plural(files, "file", "files")));
    }
    line
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}
