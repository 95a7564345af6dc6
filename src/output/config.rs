//! Output configuration types

/// How the size column is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeFormat {
    /// Raw byte count, right-aligned in eleven columns.
    Bytes,
    /// Compact unit string such as `1.5K`, right-aligned in four columns.
    Human,
}

/// Property columns printed in brackets before each name.
#[derive(Debug, Clone, Copy, Default)]
pub struct Columns {
    pub inode: bool,
    pub device: bool,
    pub mode: bool,
    pub owner: bool,
    pub group: bool,
    pub size: Option<SizeFormat>,
    pub mtime: bool,
}

impl Columns {
    pub fn any(&self) -> bool {
        self.inode
            || self.device
            || self.mode
            || self.owner
            || self.group
            || self.size.is_some()
            || self.mtime
    }
}

/// Configuration for output formatting.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Print every entry with its full path instead of its name.
    pub full_path: bool,
    /// Drop the tree glyphs entirely.
    pub no_indent: bool,
    /// Wrap names in double quotes.
    pub quote_names: bool,
    /// Expand symlinks to directories, unless they lead back into the tree.
    pub follow_links: bool,
    pub columns: Columns,
}
