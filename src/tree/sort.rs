//! Sort policies for the children of a directory

use std::cmp::Ordering;
use std::time::SystemTime;

use super::config::SortBy;
use super::node::Node;

/// Sort `nodes` in place with `policy`. The sort is stable, and `reverse`
/// inverts the comparator rather than the resulting sequence.
pub fn sort_nodes(nodes: &mut [Node], policy: SortBy, reverse: bool) {
    let cmp = comparator(policy);
    if reverse {
        nodes.sort_by(|a, b| cmp(b, a));
    } else {
        nodes.sort_by(cmp);
    }
}

fn comparator(policy: SortBy) -> fn(&Node, &Node) -> Ordering {
    match policy {
        SortBy::Name => by_name,
        SortBy::Version => by_version,
        SortBy::Size => by_size,
        SortBy::ModTime => by_mod_time,
        SortBy::ChangeTime => by_change_time,
        SortBy::DirsFirst => dirs_first,
    }
}

fn by_name(a: &Node, b: &Node) -> Ordering {
    a.name().cmp(&b.name())
}

fn by_size(a: &Node, b: &Node) -> Ordering {
    let size = |n: &Node| n.info().map_or(0, |i| i.size);
    size(a).cmp(&size(b))
}

fn by_mod_time(a: &Node, b: &Node) -> Ordering {
    let time = |n: &Node| n.info().map_or(SystemTime::UNIX_EPOCH, |i| i.modified);
    time(a).cmp(&time(b))
}

fn by_change_time(a: &Node, b: &Node) -> Ordering {
    let time = |n: &Node| {
        n.info()
            .map_or(SystemTime::UNIX_EPOCH, |i| i.changed_or_modified())
    };
    time(a).cmp(&time(b))
}

fn dirs_first(a: &Node, b: &Node) -> Ordering {
    b.is_dir().cmp(&a.is_dir())
}

fn by_version(a: &Node, b: &Node) -> Ordering {
    version_cmp(&a.name(), &b.name())
}

/// Compare names so that digit runs order numerically: `file2 < file10`.
pub fn version_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chunks = Chunks(a);
    let mut b_chunks = Chunks(b);
    loop {
        match (a_chunks.next(), b_chunks.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (is_digits(x), is_digits(y)) {
                    (true, true) => numeric_cmp(x, y),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().next().is_some_and(|b| b.is_ascii_digit())
}

/// Compare two ASCII digit strings by value without parsing, so arbitrarily
/// long runs cannot overflow.
fn numeric_cmp(x: &str, y: &str) -> Ordering {
    let x_trim = x.trim_start_matches('0');
    let y_trim = y.trim_start_matches('0');
    x_trim
        .len()
        .cmp(&y_trim.len())
        .then_with(|| x_trim.cmp(y_trim))
}

/// Splits a string into alternating runs of ASCII digits and non-digits.
struct Chunks<'a>(&'a str);

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = self.0.bytes().next()?;
        let digit = first.is_ascii_digit();
        let end = self
            .0
            .bytes()
            .position(|b| b.is_ascii_digit() != digit)
            .unwrap_or(self.0.len());
        let (chunk, rest) = self.0.split_at(end);
        self.0 = rest;
        Some(chunk)
    }
}
