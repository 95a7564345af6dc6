//! Canopy - list directory contents as an annotated, colorized tree

pub mod error;
pub mod fs;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::VisitError;
pub use fs::{FileInfo, FileKind, FileSystem, OsFs};
pub use output::{Columns, OutputConfig, SizeFormat, TreeFormatter, format_size, print_json};
pub use tree::{JsonNode, Node, SortBy, SortFlags, TreeWalker, WalkerConfig};
