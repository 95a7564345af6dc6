//! Tree formatter for text output
//!
//! `TreeFormatter` prints a walked `Node` tree depth-first, one line per
//! entry, writing each line to the sink as soon as it is built. Symlinks are
//! resolved while printing: the link target is shown after the name and, when
//! following links, directory targets are walked on the spot with the tree's
//! shared visited set so cycles are reported instead of expanded.

use std::fs;
use std::io::{self, Write};

use crate::fs::{FileInfo, FileSystem, OsFs};
use crate::tree::{Followed, LinkTarget, Node, TreeWalker};

use super::color::colorize;
use super::config::{OutputConfig, SizeFormat};
use super::utils::{
    connector, continuation_prefix, format_group, format_mtime, format_owner, format_size,
};

const NOT_FOLLOWED: &str = " [recursive, not followed]";

/// Formatter for tree output.
///
/// Holds the walker so that followed symlinks are walked with the same
/// backend and filters as the rest of the tree.
pub struct TreeFormatter<'w, F = OsFs> {
    config: OutputConfig,
    walker: &'w TreeWalker<F>,
}

impl<'w, F: FileSystem> TreeFormatter<'w, F> {
    pub fn new(config: OutputConfig, walker: &'w TreeWalker<F>) -> Self {
        Self { config, walker }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Render the tree into a string.
    pub fn format(&self, node: &Node) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        let _ = self.print(node, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Write the tree to `out`, one line per entry.
    pub fn print<W: Write>(&self, node: &Node, out: &mut W) -> io::Result<()> {
        self.print_node(node, "", out)
    }

    fn print_node<W: Write>(&self, node: &Node, indent: &str, out: &mut W) -> io::Result<()> {
        if let Some(err) = node.error() {
            return writeln!(out, "{} [{}]", node.path().display(), err.short_message());
        }
        let Some(info) = node.info() else {
            return writeln!(out, "{}", node.path().display());
        };

        if let Some(props) = self.properties(node, info) {
            write!(out, "[{}]  ", props)?;
        }

        let mut line = self.display_name(node, info);
        let mut followed = None;
        if info.is_symlink() {
            let target = self.walker.resolve_link(node);
            line.push_str(" -> ");
            line.push_str(&self.target_text(&target));

            if self.config.follow_links {
                match self.walker.follow_link(node, &target) {
                    Some(Followed::Expanded(sub)) => followed = Some(sub),
                    Some(Followed::Recursive) => line.push_str(NOT_FOLLOWED),
                    None => {}
                }
            }
        }
        writeln!(out, "{}", line)?;

        let children = followed.as_ref().map_or(node.children(), |n| n.children());
        for (i, child) in children.iter().enumerate() {
            let is_last = i + 1 == children.len();
            let child_indent = if self.config.no_indent {
                String::new()
            } else {
                write!(out, "{}{}", indent, connector(is_last))?;
                continuation_prefix(indent, is_last)
            };
            self.print_node(child, &child_indent, out)?;
        }
        Ok(())
    }

    /// Bracketed property columns, or `None` when no column applies.
    fn properties(&self, node: &Node, info: &FileInfo) -> Option<String> {
        let columns = &self.config.columns;
        let mut props = Vec::new();

        if info.is_dir() {
            if let Some(format) = columns.size {
                props.push(size_column(node.recursive_size(), format));
            }
        } else {
            if columns.inode {
                props.push(info.inode.to_string());
            }
            if columns.device {
                props.push(format!("{:>3}", info.device));
            }
            if columns.mode {
                props.push(info.mode_string());
            }
            if columns.owner {
                props.push(format_owner(info.uid));
            }
            if columns.group {
                props.push(format_group(info.gid));
            }
            if let Some(format) = columns.size {
                props.push(size_column(info.size, format));
            }
            if columns.mtime {
                props.push(format_mtime(info.modified));
            }
        }

        if props.is_empty() {
            None
        } else {
            Some(props.join(" "))
        }
    }

    fn display_name(&self, node: &Node, info: &FileInfo) -> String {
        let mut name = if node.depth() == 0 || self.config.full_path {
            node.path().display().to_string()
        } else {
            info.name.clone()
        };
        if self.config.quote_names {
            name = format!("\"{}\"", name);
        }
        if self.config.use_color {
            let dangling = info.is_symlink() && fs::canonicalize(node.path()).is_err();
            name = colorize(&info.name, info.kind, dangling, &name);
        }
        name
    }

    /// Link text, colored by the target's own attributes when it resolves.
    fn target_text(&self, target: &LinkTarget) -> String {
        match &target.info {
            Some(i) if self.config.use_color => colorize(&i.name, i.kind, false, &target.text),
            _ => target.text.clone(),
        }
    }
}

fn size_column(bytes: u64, format: SizeFormat) -> String {
    match format {
        SizeFormat::Bytes => format!("{:>11}", bytes),
        SizeFormat::Human => format!("{:>4}", format_size(bytes)),
    }
}
