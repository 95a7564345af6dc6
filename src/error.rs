//! Errors recorded on tree nodes

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to resolve one node. Stored on the node and rendered as an error
/// leaf; never aborts the rest of the traversal.
#[derive(Debug, Error)]
pub enum VisitError {
    #[error("stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("open {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl VisitError {
    pub fn stat(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Stat {
            path: path.into(),
            source,
        }
    }

    pub fn read_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Stat { source, .. } | Self::ReadDir { source, .. } => source.kind(),
        }
    }

    /// Error text without the leading `"<op> <path>: "` part.
    pub fn short_message(&self) -> String {
        short_error(&self.to_string()).to_string()
    }
}

/// Drop the `"path: "` prefix of an error message, keeping the segment after
/// the first `": "`. Messages without a separator are returned unchanged.
pub fn short_error(message: &str) -> &str {
    let mut parts = message.split(": ");
    match (parts.next(), parts.next()) {
        (Some(_), Some(second)) => second,
        _ => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_error_strips_prefix() {
        assert_eq!(short_error("stat /a/b: permission denied"), "permission denied");
        assert_eq!(short_error("a: b: c"), "b");
    }

    #[test]
    fn test_short_error_without_separator() {
        assert_eq!(short_error("permission denied"), "permission denied");
        assert_eq!(short_error(""), "");
    }

    #[test]
    fn test_visit_error_display() {
        let err = VisitError::stat(
            "/nope",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "stat /nope: no such file");
        assert_eq!(err.short_message(), "no such file");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
