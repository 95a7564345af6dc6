//! Storage abstraction consumed by the walker and formatter
//!
//! The tree is built through the [`FileSystem`] trait so callers can swap the
//! real file system for an in-memory one. [`OsFs`] is the default backend and
//! uses lstat semantics: a symlink is reported as a link, never as its target.

use std::fs;
use std::io;
use std::path::Path;
use std::time::SystemTime;

/// Kind of a file-system entry, derived once from stat metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    Socket,
    NamedPipe,
    BlockDevice,
    CharDevice,
}

impl FileKind {
    /// Leading character of an `ls -l` style mode string.
    fn mode_char(self) -> char {
        match self {
            FileKind::Regular => '-',
            FileKind::Directory => 'd',
            FileKind::Symlink => 'l',
            FileKind::Socket => 's',
            FileKind::NamedPipe => 'p',
            FileKind::BlockDevice => 'b',
            FileKind::CharDevice => 'c',
        }
    }
}

/// Metadata for a single entry as reported by a [`FileSystem`].
#[derive(Debug, Clone)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    /// Permission bits (including setuid/setgid/sticky).
    pub mode: u32,
    pub kind: FileKind,
    pub modified: SystemTime,
    /// Metadata change time, when the platform exposes one.
    pub changed: Option<SystemTime>,
    pub uid: u32,
    pub gid: u32,
    pub inode: u64,
    pub device: u64,
}

impl FileInfo {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == FileKind::Symlink
    }

    /// Change time, falling back to the modification time.
    pub fn changed_or_modified(&self) -> SystemTime {
        self.changed.unwrap_or(self.modified)
    }

    /// Render the mode as a ten character string such as `drwxr-xr-x`.
    pub fn mode_string(&self) -> String {
        const RWX: [(u32, char); 9] = [
            (0o400, 'r'),
            (0o200, 'w'),
            (0o100, 'x'),
            (0o040, 'r'),
            (0o020, 'w'),
            (0o010, 'x'),
            (0o004, 'r'),
            (0o002, 'w'),
            (0o001, 'x'),
        ];

        let mut out = String::with_capacity(10);
        out.push(self.kind.mode_char());
        for (i, (bit, c)) in RWX.iter().enumerate() {
            let set = self.mode & bit != 0;
            let special = match i {
                2 => self.mode & 0o4000 != 0,
                5 => self.mode & 0o2000 != 0,
                8 => self.mode & 0o1000 != 0,
                _ => false,
            };
            out.push(match (special, set) {
                (true, true) if i == 8 => 't',
                (true, false) if i == 8 => 'T',
                (true, true) => 's',
                (true, false) => 'S',
                (false, true) => *c,
                (false, false) => '-',
            });
        }
        out
    }
}

/// The two storage operations the tree needs.
pub trait FileSystem {
    /// Stat a path without following a trailing symlink.
    fn stat(&self, path: &Path) -> io::Result<FileInfo>;

    /// List entry names of a directory, in whatever order the backend yields.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn stat(&self, path: &Path) -> io::Result<FileInfo> {
        (**self).stat(path)
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        (**self).read_dir(path)
    }
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FileSystem for OsFs {
    fn stat(&self, path: &Path) -> io::Result<FileInfo> {
        let meta = fs::symlink_metadata(path)?;
        Ok(file_info(path, &meta))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect()
    }
}

fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(unix)]
fn file_info(path: &Path, meta: &fs::Metadata) -> FileInfo {
    use std::os::unix::fs::{FileTypeExt, MetadataExt};
    use std::time::Duration;

    let ft = meta.file_type();
    let kind = if ft.is_dir() {
        FileKind::Directory
    } else if ft.is_symlink() {
        FileKind::Symlink
    } else if ft.is_socket() {
        FileKind::Socket
    } else if ft.is_fifo() {
        FileKind::NamedPipe
    } else if ft.is_block_device() {
        FileKind::BlockDevice
    } else if ft.is_char_device() {
        FileKind::CharDevice
    } else {
        FileKind::Regular
    };

    let changed = u64::try_from(meta.ctime()).ok().map(|secs| {
        SystemTime::UNIX_EPOCH + Duration::new(secs, meta.ctime_nsec().clamp(0, 999_999_999) as u32)
    });

    FileInfo {
        name: entry_name(path),
        size: meta.size(),
        mode: meta.mode() & 0o7777,
        kind,
        modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        changed,
        uid: meta.uid(),
        gid: meta.gid(),
        inode: meta.ino(),
        device: meta.dev(),
    }
}

#[cfg(not(unix))]
fn file_info(path: &Path, meta: &fs::Metadata) -> FileInfo {
    let ft = meta.file_type();
    let kind = if ft.is_dir() {
        FileKind::Directory
    } else if ft.is_symlink() {
        FileKind::Symlink
    } else {
        FileKind::Regular
    };
    let mode = if meta.permissions().readonly() { 0o444 } else { 0o644 };

    FileInfo {
        name: entry_name(path),
        size: meta.len(),
        mode,
        kind,
        modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        changed: None,
        uid: 0,
        gid: 0,
        inode: 0,
        device: 0,
    }
}
