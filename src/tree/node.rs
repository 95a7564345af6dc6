//! In-memory tree nodes

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::rc::Rc;

use crate::error::VisitError;
use crate::fs::FileInfo;

/// Canonical paths already entered under one traversal root.
///
/// Every node of a tree holds a clone of the same handle, so a symlink that
/// leads back into the tree can be detected while printing.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet(Rc<RefCell<HashSet<PathBuf>>>);

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path` under its canonical key. Returns false if already present.
    pub fn insert(&self, path: &Path) -> bool {
        self.0.borrow_mut().insert(canonical_key(path))
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.0.borrow().contains(&canonical_key(path))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Check if two handles share the same underlying set.
    pub fn same_set(&self, other: &VisitedSet) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// One file-system entry and, for directories, its listed children.
#[derive(Debug)]
pub struct Node {
    pub(crate) path: PathBuf,
    pub(crate) depth: usize,
    pub(crate) info: Option<FileInfo>,
    pub(crate) error: Option<VisitError>,
    pub(crate) children: Vec<Node>,
    pub(crate) visited: VisitedSet,
}

impl Node {
    /// Create a root node with a fresh visited set.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_visited(path, 0, VisitedSet::new())
    }

    pub(crate) fn with_visited(
        path: impl Into<PathBuf>,
        depth: usize,
        visited: VisitedSet,
    ) -> Self {
        Self {
            path: path.into(),
            depth,
            info: None,
            error: None,
            children: Vec::new(),
            visited,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Metadata, absent when the entry could not be resolved.
    pub fn info(&self) -> Option<&FileInfo> {
        self.info.as_ref()
    }

    pub fn error(&self) -> Option<&VisitError> {
        self.error.as_ref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn is_dir(&self) -> bool {
        self.info.as_ref().is_some_and(|i| i.is_dir())
    }

    pub fn is_symlink(&self) -> bool {
        self.info.as_ref().is_some_and(|i| i.is_symlink())
    }

    /// Entry name, defaulting to the full path for roots like `.` or `/`.
    pub fn name(&self) -> String {
        match &self.info {
            Some(info) => info.name.clone(),
            None => self
                .path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.path.to_string_lossy().into_owned()),
        }
    }

    /// Sum of the sizes of every resolved file below this node.
    ///
    /// Directories contribute only through their contents.
    pub fn recursive_size(&self) -> u64 {
        self.children
            .iter()
            .filter(|child| child.error.is_none())
            .map(|child| {
                if child.is_dir() {
                    child.recursive_size()
                } else {
                    child.info.as_ref().map_or(0, |i| i.size)
                }
            })
            .sum()
    }
}

/// Key used in the visited set: the entry's parent is canonicalized while the
/// final component is kept as-is, so a symlink is keyed by its own location
/// rather than its target. Falls back to a lexically cleaned absolute path.
pub fn canonical_key(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let cleaned = lexical_clean(&absolute);
    match (cleaned.parent(), cleaned.file_name()) {
        (Some(parent), Some(name)) => match std::fs::canonicalize(parent) {
            Ok(parent) => parent.join(name),
            Err(_) => cleaned,
        },
        _ => cleaned,
    }
}

/// Resolve `.` and `..` components without touching the file system.
fn lexical_clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
