//! Configuration types for tree walkers

/// Ordering applied to the children of each directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Name,
    Version,
    Size,
    ModTime,
    ChangeTime,
    DirsFirst,
}

/// Individual sort toggles as they come from the command line.
///
/// Several may be set at once; [`SortFlags::resolve`] picks exactly one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortFlags {
    pub no_sort: bool,
    pub mod_time: bool,
    pub change_time: bool,
    pub dirs_first: bool,
    pub version: bool,
    pub size: bool,
    pub name: bool,
}

impl SortFlags {
    /// Resolve the toggles to a single policy.
    ///
    /// Priority: mtime > ctime > dirs-first > version > size > name. With no
    /// toggle set the order is by name; `no_sort` disables sorting entirely.
    pub fn resolve(self) -> Option<SortBy> {
        if self.no_sort {
            return None;
        }
        let policy = if self.mod_time {
            SortBy::ModTime
        } else if self.change_time {
            SortBy::ChangeTime
        } else if self.dirs_first {
            SortBy::DirsFirst
        } else if self.version {
            SortBy::Version
        } else if self.size {
            SortBy::Size
        } else {
            SortBy::Name
        };
        Some(policy)
    }
}

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Include entries whose name starts with `.`
    pub show_all: bool,
    /// `None` or `Some(0)` means unlimited.
    pub max_depth: Option<usize>,
    pub dirs_only: bool,
    /// Regex a file name must match to be listed.
    pub pattern: Option<String>,
    /// Regex that excludes matching file names.
    pub ignore_pattern: Option<String>,
    pub ignore_case: bool,
    /// `None` keeps the backend's listing order.
    pub sort: Option<SortBy>,
    pub reverse: bool,
}

impl WalkerConfig {
    /// Check if a node at `depth` must not be expanded.
    pub fn at_max_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|max| max > 0 && depth >= max)
    }
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            show_all: false,
            max_depth: None,
            dirs_only: false,
            pattern: None,
            ignore_pattern: None,
            ignore_case: false,
            sort: Some(SortBy::Name),
            reverse: false,
        }
    }
}
