use crate::error::{ClipError, ClipResult};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// The single pending clipboard entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardItem {
    pub source_path: PathBuf,
    pub operation: ClipboardOperation,
    pub marked_at: Instant,
}

impl ClipboardItem {
    pub fn new(path: PathBuf, operation: ClipboardOperation) -> ClipResult<Self> {
        if !path.is_absolute() {
            return Err(ClipError::relative_path(&path));
        }

        if path.file_name().is_none() {
            return Err(ClipError::invalid_path(&path));
        }

        Ok(Self {
            source_path: path,
            operation,
            marked_at: Instant::now(),
        })
    }

    pub fn source(&self) -> &Path {
        &self.source_path
    }

    pub fn display_name(&self) -> &str {
        self.source_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("Unknown")
    }

    pub fn operation_tag(&self) -> &'static str {
        match self.operation {
            ClipboardOperation::Copy => "C",
            ClipboardOperation::Move => "M",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardOperation {
    Copy,
    Move,
}

impl std::fmt::Display for ClipboardOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Move => write!(f, "move"),
        }
    }
}
