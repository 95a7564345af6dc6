//! File-category coloring
//!
//! Names are classified first by extension, then by file kind. Terminal
//! styles (dangling links, sockets, pipes, devices) carry their own
//! background; all other matches share a bold foreground.

use std::io::Write;

use termcolor::{Ansi, Color, ColorSpec, WriteColor};

use crate::fs::FileKind;

const EXECUTABLE_EXTENSIONS: &[&str] = &["bat", "btm", "cmd", "com", "dll", "exe"];

const ARCHIVE_EXTENSIONS: &[&str] = &[
    "arj", "bz2", "deb", "gz", "lzh", "rpm", "tar", "taz", "tb2", "tbz2", "tbz", "tgz", "tz",
    "tz2", "z", "zip", "zoo",
];

const MEDIA_EXTENSIONS: &[&str] = &[
    "asf", "avi", "bmp", "flac", "gif", "jpg", "jpeg", "m2a", "m2v", "mov", "mp3", "mpeg", "mpg",
    "ogg", "ppm", "rm", "tga", "tif", "wav", "wmv", "xbm", "xpm",
];

/// Styling selected for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Bold foreground color.
    Bold(Color),
    /// Symlink whose target cannot be resolved.
    DanglingLink,
    Socket,
    NamedPipe,
    Device,
}

impl Style {
    pub fn spec(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        // only the trailing reset is written
        spec.set_reset(false);
        match self {
            Style::Bold(color) => {
                spec.set_fg(Some(color)).set_bold(true);
            }
            Style::DanglingLink => {
                spec.set_bg(Some(Color::Black))
                    .set_fg(Some(Color::Red))
                    .set_bold(true);
            }
            Style::Socket => {
                spec.set_bg(Some(Color::Black))
                    .set_fg(Some(Color::Magenta))
                    .set_bold(true);
            }
            Style::NamedPipe => {
                spec.set_bg(Some(Color::Black)).set_fg(Some(Color::Yellow));
            }
            Style::Device => {
                spec.set_bg(Some(Color::Black))
                    .set_fg(Some(Color::Yellow))
                    .set_bold(true);
            }
        }
        spec
    }

    /// Wrap `text` in the escape sequences for this style, followed by a reset.
    pub fn paint(self, text: &str) -> String {
        paint(text, &self.spec())
    }
}

/// Pick a style for an entry, or `None` for plain files.
///
/// `dangling` is only consulted for symlinks.
pub fn classify(name: &str, kind: FileKind, dangling: bool) -> Option<Style> {
    if let Some(color) = extension_color(name) {
        return Some(Style::Bold(color));
    }
    match kind {
        FileKind::Directory => Some(Style::Bold(Color::Blue)),
        FileKind::Symlink if dangling => Some(Style::DanglingLink),
        FileKind::Symlink => Some(Style::Bold(Color::Cyan)),
        FileKind::Socket => Some(Style::Socket),
        FileKind::NamedPipe => Some(Style::NamedPipe),
        FileKind::BlockDevice | FileKind::CharDevice => Some(Style::Device),
        FileKind::Regular => None,
    }
}

/// Colorize `text` according to the entry's category.
pub fn colorize(name: &str, kind: FileKind, dangling: bool, text: &str) -> String {
    match classify(name, kind, dangling) {
        Some(style) => style.paint(text),
        None => text.to_string(),
    }
}

fn extension_color(name: &str) -> Option<Color> {
    let (_, ext) = name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if EXECUTABLE_EXTENSIONS.contains(&ext.as_str()) {
        Some(Color::Green)
    } else if ARCHIVE_EXTENSIONS.contains(&ext.as_str()) {
        Some(Color::Red)
    } else if MEDIA_EXTENSIONS.contains(&ext.as_str()) {
        Some(Color::Magenta)
    } else {
        None
    }
}

fn paint(text: &str, spec: &ColorSpec) -> String {
    let mut out = Ansi::new(Vec::with_capacity(text.len() + 16));
    let written = out
        .set_color(spec)
        .and_then(|_| out.write_all(text.as_bytes()))
        .and_then(|_| out.reset());
    match written {
        Ok(()) => String::from_utf8_lossy(&out.into_inner()).into_owned(),
        Err(_) => text.to_string(),
    }
}
