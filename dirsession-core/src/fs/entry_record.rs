//! `src/fs/entry_record.rs`
//! ============================================================
//! Normalized metadata for one directory child.
//!
//! A record is a value snapshot taken at extraction time. It does not follow
//! the filesystem afterwards and may go stale; operations re-validate against
//! the live filesystem instead of trusting these fields.

// ------------------------------------------------------------
// Standard-library imports
// ------------------------------------------------------------

use std::ffi::{OsStr, OsString};
use std::fmt::Write as _;
use std::fs::{self, DirEntry, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

// ------------------------------------------------------------
// Third-party crate imports
// ------------------------------------------------------------

use bytesize::ByteSize;
use chrono::{DateTime, Local, TimeZone, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------
// Local-crate imports
// ------------------------------------------------------------

use crate::error::{SessionError, SessionResult};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

// ------------------------------------------------------------
// EntryKind: closed classification, symlinks resolved.
// ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    #[inline]
    #[must_use]
    pub const fn is_dir(self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Column label used by listings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Directory => "Folder",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ------------------------------------------------------------
// DirectoryEntryRecord
// ------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntryRecord {
    /// Last path component for display; never empty, never contains a
    /// separator. Lossy for names that are not valid UTF-8.
    pub name: CompactString,

    /// Exact on-disk name. Paths are always built from this one.
    #[serde(skip)]
    file_name: OsString,

    pub kind: EntryKind,

    /// Byte length, only for files.
    pub size_bytes: Option<u64>,

    /// Wall-clock modification time.
    pub modified_at: DateTime<Local>,
}

impl DirectoryEntryRecord {
    /// Build a record for an entry yielded by `read_dir`.
    pub fn extract(entry: &DirEntry) -> SessionResult<Self> {
        Self::build(&entry.path(), entry.file_name())
    }

    /// Build a record for an arbitrary path.
    pub fn from_path(path: &Path) -> SessionResult<Self> {
        let file_name: OsString = path
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| SessionError::invalid_path(path, "path has no final component"))?;

        Self::build(path, file_name)
    }

    fn build(path: &Path, file_name: OsString) -> SessionResult<Self> {
        let meta: Metadata = stat_following_links(path)?;

        let kind: EntryKind = if meta.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };

        // Never ask a directory for its length.
        let size_bytes: Option<u64> = match kind {
            EntryKind::File => Some(meta.len()),
            EntryKind::Directory => None,
        };

        let modified: SystemTime = meta.modified().map_err(|e| SessionError::MetadataUnavailable {
            path: path.to_path_buf(),
            kind: e.kind(),
        })?;

        Ok(Self {
            name: CompactString::new(file_name.to_string_lossy()),
            file_name,
            kind,
            size_bytes,
            modified_at: wall_clock(modified),
        })
    }

    #[inline]
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    #[must_use]
    pub fn file_name(&self) -> &OsStr {
        &self.file_name
    }

    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        self.kind.label()
    }

    /// Human-readable size; `--` for folders.
    #[must_use]
    pub fn size_human(&self) -> String {
        match (self.kind, self.size_bytes) {
            (EntryKind::File, Some(bytes)) => ByteSize::b(bytes).to_string(),
            (EntryKind::File, None) | (EntryKind::Directory, _) => "--".to_string(),
        }
    }

    /// Falls back to [`DEFAULT_DATE_FORMAT`] when `fmt` is not a valid
    /// strftime pattern.
    #[must_use]
    pub fn format_modified(&self, fmt: &str) -> String {
        let mut out = String::new();

        if write!(out, "{}", self.modified_at.format(fmt)).is_err() {
            out.clear();
            let _ = write!(out, "{}", self.modified_at.format(DEFAULT_DATE_FORMAT));
        }

        out
    }

    /// Lower-case extension, files only.
    #[must_use]
    pub fn extension(&self) -> Option<CompactString> {
        match self.kind {
            EntryKind::File => Path::new(self.name.as_str())
                .extension()
                .and_then(OsStr::to_str)
                .map(|s: &str| CompactString::new(s.to_lowercase())),
            EntryKind::Directory => None,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }
}

/// `metadata` follows symlinks; a dangling link falls back to the link itself
/// and is classified as a file.
fn stat_following_links(path: &Path) -> SessionResult<Metadata> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta),
        Err(e) if e.kind() == ErrorKind::NotFound => fs::symlink_metadata(path)
            .map_err(|e| SessionError::MetadataUnavailable {
                path: path.to_path_buf(),
                kind: e.kind(),
            }),
        Err(e) => Err(SessionError::MetadataUnavailable {
            path: path.to_path_buf(),
            kind: e.kind(),
        }),
    }
}

/// Align a filesystem timestamp to the wall clock.
///
/// The offset from `UNIX_EPOCH` is taken explicitly in both directions so
/// pre-1970 timestamps survive instead of collapsing to the epoch.
#[must_use]
pub fn wall_clock(t: SystemTime) -> DateTime<Local> {
    let utc: Option<DateTime<Utc>> = match t.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs())
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, after.subsec_nanos()).single()),
        Err(before) => {
            let before = before.duration();
            i64::try_from(before.as_secs()).ok().and_then(|secs| {
                // Borrow one second so the nanosecond part stays non-negative.
                if before.subsec_nanos() == 0 {
                    Utc.timestamp_opt(-secs, 0).single()
                } else {
                    Utc.timestamp_opt(-secs - 1, 1_000_000_000 - before.subsec_nanos())
                        .single()
                }
            })
        }
    };

    utc.unwrap_or_else(|| DateTime::<Utc>::from(UNIX_EPOCH))
        .with_timezone(&Local)
}
