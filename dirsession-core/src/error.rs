//! src/error.rs
//! ============================================================================
//! # `SessionError`: Error taxonomy for the directory session
//!
//! Every variant names the path(s) it concerns so the host can render an
//! honest message. All variants are recoverable; nothing in the core aborts
//! the process.

use clipr::ClipError;
use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Convenient alias carrying the unified error type
pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Access denied: {}", path.display())]
    AccessDenied { path: PathBuf },

    #[error("Already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error(
        "Cannot move across devices: {} -> {}",
        source_path.display(),
        dest_path.display()
    )]
    CrossDeviceUnsupported {
        source_path: PathBuf,
        dest_path: PathBuf,
    },

    #[error("Disk full while writing {}", path.display())]
    DiskFull { path: PathBuf },

    /// Entry vanished (or became unreadable) between enumeration and stat.
    #[error("Metadata unavailable for {}: {kind:?}", path.display())]
    MetadataUnavailable { path: PathBuf, kind: ErrorKind },

    #[error("Invalid path {}: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Invalid name {name:?}: must be non-empty, not '.' or '..', and contain no path separator")]
    InvalidName { name: String },

    #[error("No entry at position {index} (listing has {len} entries)")]
    InvalidSelection { index: usize, len: usize },

    #[error("Clipboard: {0}")]
    Clipboard(#[from] ClipError),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SessionError {
    /// Classify an `io::Error` raised while operating on `path`.
    pub fn from_io(err: io::Error, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();

        match err.kind() {
            ErrorKind::NotFound => Self::PathNotFound { path },
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
                Self::AccessDenied { path }
            }
            ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            ErrorKind::NotADirectory => Self::NotADirectory { path },
            ErrorKind::StorageFull | ErrorKind::QuotaExceeded | ErrorKind::FileTooLarge => {
                Self::DiskFull { path }
            }
            ErrorKind::CrossesDevices => Self::CrossDeviceUnsupported {
                source_path: path.clone(),
                dest_path: path,
            },
            _ => Self::Io { path, source: err },
        }
    }

    /// Like [`SessionError::from_io`] but for two-path operations (rename/move).
    pub fn from_io_pair(err: io::Error, source: &Path, dest: &Path) -> Self {
        match err.kind() {
            ErrorKind::CrossesDevices => Self::CrossDeviceUnsupported {
                source_path: source.to_path_buf(),
                dest_path: dest.to_path_buf(),
            },
            ErrorKind::NotFound => Self::PathNotFound {
                path: source.to_path_buf(),
            },
            _ => Self::from_io(err, dest),
        }
    }

    pub fn invalid_path<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_name<S: Into<String>>(name: S) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// The path most relevant to this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PathNotFound { path }
            | Self::NotADirectory { path }
            | Self::AccessDenied { path }
            | Self::AlreadyExists { path }
            | Self::DiskFull { path }
            | Self::MetadataUnavailable { path, .. }
            | Self::InvalidPath { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::CrossDeviceUnsupported { source_path, .. } => Some(source_path),
            Self::InvalidName { .. } | Self::InvalidSelection { .. } | Self::Clipboard(_) => None,
        }
    }

    /// Stable label used as a tracing field
    #[inline]
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::PathNotFound { .. } => "path_not_found",
            Self::NotADirectory { .. } => "not_a_directory",
            Self::AccessDenied { .. } => "access_denied",
            Self::AlreadyExists { .. } => "already_exists",
            Self::CrossDeviceUnsupported { .. } => "cross_device_unsupported",
            Self::DiskFull { .. } => "disk_full",
            Self::MetadataUnavailable { .. } => "metadata_unavailable",
            Self::InvalidPath { .. } => "invalid_path",
            Self::InvalidName { .. } => "invalid_name",
            Self::InvalidSelection { .. } => "invalid_selection",
            Self::Clipboard(_) => "clipboard",
            Self::Io { .. } => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_kinds_map_onto_taxonomy() {
        let p = Path::new("/x");

        assert!(matches!(
            SessionError::from_io(io::Error::from(ErrorKind::NotFound), p),
            SessionError::PathNotFound { .. }
        ));
        assert!(matches!(
            SessionError::from_io(io::Error::from(ErrorKind::PermissionDenied), p),
            SessionError::AccessDenied { .. }
        ));
        assert!(matches!(
            SessionError::from_io(io::Error::from(ErrorKind::StorageFull), p),
            SessionError::DiskFull { .. }
        ));
        assert!(matches!(
            SessionError::from_io(io::Error::from(ErrorKind::AlreadyExists), p),
            SessionError::AlreadyExists { .. }
        ));
        assert!(matches!(
            SessionError::from_io(io::Error::from(ErrorKind::Interrupted), p),
            SessionError::Io { .. }
        ));
    }

    #[test]
    fn directory_refilled_during_delete_is_io() {
        let err = SessionError::from_io(io::Error::from(ErrorKind::DirectoryNotEmpty), Path::new("/x/d"));

        assert!(matches!(err, SessionError::Io { .. }), "{err:?}");
        assert!(!err.to_string().contains("Already exists"));
        assert_eq!(err.path(), Some(Path::new("/x/d")));
    }

    #[test]
    fn cross_device_rename_keeps_both_paths() {
        let err = SessionError::from_io_pair(
            io::Error::from(ErrorKind::CrossesDevices),
            Path::new("/mnt/a/file"),
            Path::new("/mnt/b/file"),
        );

        match err {
            SessionError::CrossDeviceUnsupported {
                source_path,
                dest_path,
            } => {
                assert_eq!(source_path, PathBuf::from("/mnt/a/file"));
                assert_eq!(dest_path, PathBuf::from("/mnt/b/file"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn raw_exdev_is_cross_device() {
        // EXDEV is 18 on Linux and the BSDs
        let err = SessionError::from_io_pair(
            io::Error::from_raw_os_error(18),
            Path::new("/a"),
            Path::new("/b"),
        );

        assert_eq!(err.kind_label(), "cross_device_unsupported");
    }

    #[test]
    fn missing_rename_source_reports_source() {
        let err = SessionError::from_io_pair(
            io::Error::from(ErrorKind::NotFound),
            Path::new("/a"),
            Path::new("/b"),
        );

        assert_eq!(err.path(), Some(Path::new("/a")));
    }
}
