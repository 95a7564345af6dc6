//! Directory tree walking logic
//!
//! `TreeWalker` resolves a root through a `FileSystem` backend and builds the
//! full tree in memory. Filtering (hidden files, directories-only, name
//! patterns) and per-directory sorting happen during the walk. Symlinks are
//! resolved and followed on demand by the renderers (see `link`).

mod config;
mod filter;
mod json_types;
mod link;
mod node;
mod sort;
mod walker;

// Re-export public types
pub use config::{SortBy, SortFlags, WalkerConfig};
pub use filter::FileFilter;
pub use json_types::JsonNode;
pub use link::{Followed, LinkTarget};
pub use node::{Node, VisitedSet, canonical_key};
pub use sort::{sort_nodes, version_cmp};
pub use walker::TreeWalker;
