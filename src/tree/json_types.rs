//! JSON serialization types for tree output

use std::path::PathBuf;

use serde::Serialize;

use crate::fs::FileSystem;

use super::link::Followed;
use super::node::Node;
use super::walker::TreeWalker;

/// Serializable view of a walked tree.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonNode {
    Directory {
        name: String,
        path: PathBuf,
        /// Total size of all files below this directory.
        size: u64,
        contents: Vec<JsonNode>,
    },
    File {
        name: String,
        path: PathBuf,
        size: u64,
    },
    Link {
        name: String,
        path: PathBuf,
        target: String,
        /// Entries of a followed directory target.
        #[serde(skip_serializing_if = "Option::is_none")]
        contents: Option<Vec<JsonNode>>,
        /// Set when the target is already part of the tree.
        #[serde(skip_serializing_if = "is_false")]
        recursive: bool,
    },
    Error {
        name: String,
        path: PathBuf,
        error: String,
    },
    Report {
        directories: usize,
        files: usize,
    },
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl JsonNode {
    /// Build the JSON view of `node`. With `follow_links`, directory links are
    /// expanded through `walker` exactly as the text output expands them.
    pub fn from_tree<F: FileSystem>(
        node: &Node,
        walker: &TreeWalker<F>,
        follow_links: bool,
    ) -> Self {
        let name = if node.depth() == 0 {
            node.path().to_string_lossy().into_owned()
        } else {
            node.name()
        };
        let path = node.path().to_path_buf();

        if let Some(err) = node.error() {
            return JsonNode::Error {
                name,
                path,
                error: err.short_message(),
            };
        }

        let children = |children: &[Node]| -> Vec<JsonNode> {
            children
                .iter()
                .map(|child| JsonNode::from_tree(child, walker, follow_links))
                .collect()
        };

        match node.info() {
            Some(info) if info.is_dir() => JsonNode::Directory {
                name,
                size: node.recursive_size(),
                contents: children(node.children()),
                path,
            },
            Some(info) if info.is_symlink() => {
                let target = walker.resolve_link(node);
                let followed = if follow_links {
                    walker.follow_link(node, &target)
                } else {
                    None
                };
                let (contents, recursive) = match followed {
                    Some(Followed::Expanded(sub)) => (Some(children(sub.children())), false),
                    Some(Followed::Recursive) => (None, true),
                    None => (None, false),
                };
                JsonNode::Link {
                    name,
                    path,
                    target: target.text,
                    contents,
                    recursive,
                }
            }
            Some(info) => JsonNode::File {
                name,
                path,
                size: info.size,
            },
            // Unvisited node: nothing known beyond its path.
            None => JsonNode::File {
                name,
                path,
                size: 0,
            },
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            JsonNode::Directory { name, .. }
            | JsonNode::File { name, .. }
            | JsonNode::Link { name, .. }
            | JsonNode::Error { name, .. } => Some(name),
            JsonNode::Report { .. } => None,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, JsonNode::Directory { .. })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::test_utils::MemoryFs;
    use crate::tree::{TreeWalker, WalkerConfig};

    use super::*;

    #[test]
    fn test_json_shape() {
        let mut fs = MemoryFs::new();
        fs.add_file("root/a.txt", 10);
        fs.add_file("root/sub/b.txt", 32);
        fs.fail_stat("root/sub/c.txt", std::io::ErrorKind::PermissionDenied);

        let walker = TreeWalker::with_fs(fs, WalkerConfig::default());
        let (tree, _) = walker.walk(Path::new("root"));
        let json = serde_json::to_value(JsonNode::from_tree(&tree, &walker, false)).unwrap();

        assert_eq!(json["type"], "directory");
        assert_eq!(json["name"], "root");
        assert_eq!(json["size"], 42);
        assert_eq!(json["contents"][0]["type"], "file");
        assert_eq!(json["contents"][0]["name"], "a.txt");
        assert_eq!(json["contents"][1]["size"], 32);
        assert_eq!(json["contents"][1]["contents"][1]["type"], "error");
    }

    #[test]
    fn test_report_entry() {
        let json = serde_json::to_value(JsonNode::Report {
            directories: 2,
            files: 3,
        })
        .unwrap();
        assert_eq!(json["type"], "report");
        assert_eq!(json["directories"], 2);
        assert!(JsonNode::Report { directories: 0, files: 0 }.name().is_none());
    }
}
