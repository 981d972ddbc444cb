//! Clipboard error types

use compact_str::CompactString;
use thiserror::Error;

pub type ClipResult<T> = Result<T, ClipError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipError {
    #[error("Clipboard is empty, nothing to paste")]
    NothingToPaste,

    #[error("Invalid clipboard path (no final component): {0}")]
    InvalidPath(CompactString),

    #[error("Clipboard paths must be absolute: {0}")]
    RelativePath(CompactString),
}

impl ClipError {
    pub(crate) fn invalid_path(path: &std::path::Path) -> Self {
        Self::InvalidPath(CompactString::new(path.to_string_lossy()))
    }

    pub(crate) fn relative_path(path: &std::path::Path) -> Self {
        Self::RelativePath(CompactString::new(path.to_string_lossy()))
    }
}
