//! TreeWalker - builds the full tree in memory

use std::path::{Path, PathBuf};

use crate::error::VisitError;
use crate::fs::{FileSystem, OsFs};

use super::config::WalkerConfig;
use super::filter::FileFilter;
use super::node::{Node, VisitedSet};
use super::sort::sort_nodes;

/// Tree walker that resolves every entry through a [`FileSystem`] backend and
/// returns the fully materialized tree.
pub struct TreeWalker<F = OsFs> {
    fs: F,
    config: WalkerConfig,
    filter: FileFilter,
}

impl TreeWalker<OsFs> {
    pub fn new(config: WalkerConfig) -> Self {
        Self::with_fs(OsFs, config)
    }
}

impl<F: FileSystem> TreeWalker<F> {
    pub fn with_fs(fs: F, config: WalkerConfig) -> Self {
        let filter = FileFilter::new(&config);
        Self { fs, config, filter }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walk `root` with a fresh visited set. Returns the tree together with
    /// `(directories, files)`, where the root directory counts as one.
    pub fn walk(&self, root: &Path) -> (Node, (usize, usize)) {
        let mut node = Node::new(root);
        let counts = self.visit(&mut node);
        (node, counts)
    }

    /// Walk `path` as a sub-tree that shares `visited` with an existing tree.
    pub(crate) fn walk_shared(&self, path: PathBuf, depth: usize, visited: VisitedSet) -> Node {
        let mut node = Node::with_visited(path, depth, visited);
        self.visit(&mut node);
        node
    }

    /// Resolve `node` and, if it is a directory, its descendants.
    ///
    /// Returns `(directories, files)` found at and below `node`. A node that
    /// cannot be resolved keeps its error and counts as nothing.
    pub fn visit(&self, node: &mut Node) -> (usize, usize) {
        node.visited.insert(&node.path);

        let info = match self.fs.stat(&node.path) {
            Ok(info) => info,
            Err(e) => {
                tracing::debug!(path = %node.path.display(), error = %e, "stat failed");
                node.error = Some(VisitError::stat(&node.path, e));
                return (0, 0);
            }
        };
        let is_dir = info.is_dir();
        node.info = Some(info);
        if !is_dir {
            return (0, 1);
        }

        if self.config.at_max_depth(node.depth) {
            return (1, 0);
        }

        let names = match self.fs.read_dir(&node.path) {
            Ok(names) => names,
            Err(e) => {
                tracing::debug!(path = %node.path.display(), error = %e, "read_dir failed");
                node.error = Some(VisitError::read_dir(&node.path, e));
                return (0, 0);
            }
        };

        let (mut dirs, mut files) = (0, 0);
        for name in names {
            if !self.config.show_all && name.starts_with('.') {
                continue;
            }

            let mut child =
                Node::with_visited(node.path.join(&name), node.depth + 1, node.visited.clone());
            let (d, f) = self.visit(&mut child);

            if child.error.is_none() && !child.is_dir() {
                if self.config.dirs_only || !self.filter.is_included(&name) {
                    continue;
                }
            }

            node.children.push(child);
            dirs += d;
            files += f;
        }

        if let Some(policy) = self.config.sort {
            sort_nodes(&mut node.children, policy, self.config.reverse);
        }

        (dirs + 1, files)
    }
}
