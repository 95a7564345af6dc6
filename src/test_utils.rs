//! Test utilities: temporary directories and an in-memory file system.
//!
//! This module is only compiled for tests and benchmarks.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use crate::fs::{FileInfo, FileKind, FileSystem};

/// A temporary directory for testing.
///
/// The directory is automatically cleaned up when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Add an empty directory, creating parents as needed.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Create a symlink at `link` pointing to `target` (taken verbatim).
    #[cfg(unix)]
    pub fn add_symlink(&self, target: &str, link: &str) -> PathBuf {
        let full_path = self.dir.path().join(link);
        std::os::unix::fs::symlink(target, &full_path).expect("Failed to create symlink");
        full_path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Nominal size reported for directories, like most real file systems.
pub const DIR_SIZE: u64 = 4096;

#[derive(Debug, Clone)]
enum Entry {
    Ok {
        info: FileInfo,
        list_error: Option<io::ErrorKind>,
    },
    Broken(io::ErrorKind),
}

/// In-memory [`FileSystem`] with deterministic metadata and injectable
/// failures. Paths are used verbatim as keys; directory listings come back in
/// name order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    entries: BTreeMap<PathBuf, Entry>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and any missing parents.
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut FileInfo {
        let path = path.as_ref();
        self.ensure_parents(path);
        let entry = self
            .entries
            .entry(path.to_path_buf())
            .or_insert_with(|| Entry::Ok {
                info: info(path, FileKind::Directory, DIR_SIZE, 0o755),
                list_error: None,
            });
        match entry {
            Entry::Ok { info, .. } => info,
            Entry::Broken(_) => panic!("{} was registered as broken", path.display()),
        }
    }

    /// Add a regular file of `size` bytes and any missing parents.
    pub fn add_file(&mut self, path: impl AsRef<Path>, size: u64) -> &mut FileInfo {
        self.add_entry(path, FileKind::Regular, size)
    }

    /// Add an entry of any kind.
    pub fn add_entry(
        &mut self,
        path: impl AsRef<Path>,
        kind: FileKind,
        size: u64,
    ) -> &mut FileInfo {
        let path = path.as_ref();
        self.ensure_parents(path);
        let mode = if kind == FileKind::Directory { 0o755 } else { 0o644 };
        self.entries.insert(
            path.to_path_buf(),
            Entry::Ok {
                info: info(path, kind, size, mode),
                list_error: None,
            },
        );
        match self.entries.get_mut(path) {
            Some(Entry::Ok { info, .. }) => info,
            _ => unreachable!(),
        }
    }

    /// Register an entry whose stat fails with `kind`.
    pub fn fail_stat(&mut self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        let path = path.as_ref();
        self.ensure_parents(path);
        self.entries.insert(path.to_path_buf(), Entry::Broken(kind));
    }

    /// Make listing the directory at `path` fail with `kind`.
    pub fn fail_read_dir(&mut self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        let path = path.as_ref();
        self.add_dir(path);
        if let Some(Entry::Ok { list_error, .. }) = self.entries.get_mut(path) {
            *list_error = Some(kind);
        }
    }

    fn ensure_parents(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !self.entries.contains_key(parent) {
                self.add_dir(parent);
            }
        }
    }
}

fn info(path: &Path, kind: FileKind, size: u64, mode: u32) -> FileInfo {
    FileInfo {
        name: path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned()),
        size,
        mode,
        kind,
        modified: SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
        changed: None,
        uid: 0,
        gid: 0,
        inode: 0,
        device: 0,
    }
}

impl FileSystem for MemoryFs {
    fn stat(&self, path: &Path) -> io::Result<FileInfo> {
        match self.entries.get(path) {
            Some(Entry::Ok { info, .. }) => Ok(info.clone()),
            Some(Entry::Broken(kind)) => Err(io::Error::from(*kind)),
            None => Err(io::Error::from(io::ErrorKind::NotFound)),
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        match self.entries.get(path) {
            Some(Entry::Ok { list_error: Some(kind), .. }) => return Err(io::Error::from(*kind)),
            Some(Entry::Ok { info, .. }) if info.is_dir() => {}
            Some(Entry::Ok { .. }) => return Err(io::Error::other("not a directory")),
            Some(Entry::Broken(kind)) => return Err(io::Error::from(*kind)),
            None => return Err(io::Error::from(io::ErrorKind::NotFound)),
        }
        Ok(self
            .entries
            .keys()
            .filter(|p| p.parent() == Some(path))
            .filter_map(|p| p.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect())
    }
}
