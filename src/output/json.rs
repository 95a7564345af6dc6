//! JSON output formatting

use std::io::{self, Write};

use crate::tree::JsonNode;

/// Write trees as a pretty-printed JSON array, followed by a report entry.
pub fn print_json<W: Write>(
    roots: &[JsonNode],
    counts: (usize, usize),
    out: &mut W,
) -> io::Result<()> {
    let mut entries = roots.to_vec();
    entries.push(JsonNode::Report {
        directories: counts.0,
        files: counts.1,
    });
    serde_json::to_writer_pretty(&mut *out, &entries).map_err(io::Error::other)?;
    writeln!(out)
}
