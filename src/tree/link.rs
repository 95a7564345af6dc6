//! Symlink resolution and following
//!
//! Links are never resolved during the walk. Renderers call
//! [`TreeWalker::resolve_link`] and [`TreeWalker::follow_link`] while printing,
//! so text and JSON output expand the same links the same way.

use std::fs;
use std::path::PathBuf;

use crate::fs::{FileInfo, FileSystem};

use super::node::Node;
use super::walker::TreeWalker;

/// Where a symlink points.
#[derive(Debug, Clone)]
pub struct LinkTarget {
    /// Link text as stored, or the link's own path if it cannot be read.
    pub text: String,
    /// Canonical target, or the link text if it does not resolve.
    pub path: PathBuf,
    /// Target metadata; `None` for a dangling link.
    pub info: Option<FileInfo>,
}

impl LinkTarget {
    pub fn is_dir(&self) -> bool {
        self.info.as_ref().is_some_and(|i| i.is_dir())
    }
}

/// Outcome of following a link.
#[derive(Debug)]
pub enum Followed {
    /// The target directory, walked at the link's depth.
    Expanded(Node),
    /// The target is already part of the tree.
    Recursive,
}

impl<F: FileSystem> TreeWalker<F> {
    /// Read and resolve the symlink at `node`.
    pub fn resolve_link(&self, node: &Node) -> LinkTarget {
        let path = node.path();
        let text = fs::read_link(path)
            .map(|t| t.display().to_string())
            .unwrap_or_else(|_| path.display().to_string());

        let (target, info) = match fs::canonicalize(path) {
            Ok(target) => {
                let info = self.fs().stat(&target).ok();
                (target, info)
            }
            Err(_) => (PathBuf::from(&text), None),
        };

        LinkTarget {
            text,
            path: target,
            info,
        }
    }

    /// Walk a directory target with the tree's visited set, unless the target
    /// was already entered. Returns `None` for targets that are not
    /// directories.
    pub fn follow_link(&self, node: &Node, target: &LinkTarget) -> Option<Followed> {
        if !target.is_dir() {
            return None;
        }
        if node.visited().contains(&target.path) {
            return Some(Followed::Recursive);
        }
        tracing::debug!(
            link = %node.path().display(),
            target = %target.path.display(),
            "following symlink"
        );
        Some(Followed::Expanded(self.walk_shared(
            target.path.clone(),
            node.depth(),
            node.visited().clone(),
        )))
    }
}
