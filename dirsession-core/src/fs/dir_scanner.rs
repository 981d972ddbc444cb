//! ``src/fs/dir_scanner.rs``
//!
//! # `Directory Scanner`: immutable directory snapshots
//!
//! Enumerates the immediate children of a directory into a
//! [`DirectorySnapshot`]. Order is whatever the filesystem yields; callers
//! that need a stable order ask for [`DirectorySnapshot::sorted`].

use crate::error::{SessionError, SessionResult};
use crate::fs::entry_record::DirectoryEntryRecord;
use serde::Serialize;
use std::cmp::Ordering;
use std::fs::{self, ReadDir};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, instrument, Span};

/// Point-in-time listing of a directory.
///
/// Fields are private: a snapshot is never patched, only replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySnapshot {
    location: PathBuf,
    entries: Vec<DirectoryEntryRecord>,
}

/// Sort mode for caller-requested orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntrySort {
    #[default]
    NameAsc,
    NameDesc,
    SizeAsc,
    SizeDesc,
    ModifiedAsc,
    ModifiedDesc,
}

impl std::fmt::Display for EntrySort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: &'_ str = match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::SizeAsc => "size_asc",
            Self::SizeDesc => "size_desc",
            Self::ModifiedAsc => "modified_asc",
            Self::ModifiedDesc => "modified_desc",
        };

        write!(f, "{s}")
    }
}

impl std::str::FromStr for EntrySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" | "name_asc" => Ok(Self::NameAsc),
            "name_desc" => Ok(Self::NameDesc),
            "size" | "size_asc" => Ok(Self::SizeAsc),
            "size_desc" => Ok(Self::SizeDesc),
            "modified" | "modified_asc" | "date" | "date_asc" => Ok(Self::ModifiedAsc),
            "modified_desc" | "date_desc" => Ok(Self::ModifiedDesc),
            other => Err(format!("unknown sort mode '{other}'")),
        }
    }
}

impl DirectorySnapshot {
    #[must_use]
    pub fn location(&self) -> &Path {
        &self.location
    }

    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntryRecord] {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DirectoryEntryRecord> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&DirectoryEntryRecord> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Absolute path implied by a record of this snapshot.
    #[must_use]
    pub fn path_of(&self, record: &DirectoryEntryRecord) -> PathBuf {
        self.location.join(record.file_name())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Entries paired with their snapshot index, optionally without dotfiles.
    pub fn visible(&self, show_hidden: bool) -> impl Iterator<Item = (usize, &DirectoryEntryRecord)> {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| show_hidden || !e.is_hidden())
    }

    /// A new ordering (directories first) paired with snapshot indices.
    /// The snapshot itself is left in enumeration order.
    #[must_use]
    pub fn sorted(&self, sort: EntrySort) -> Vec<(usize, &DirectoryEntryRecord)> {
        let mut ordered: Vec<(usize, &DirectoryEntryRecord)> = self.entries.iter().enumerate().collect();

        ordered.sort_by(|(_, a), (_, b)| -> Ordering {
            b.is_dir()
                .cmp(&a.is_dir())
                .then_with(|| compare(a, b, sort))
        });

        ordered
    }
}

fn compare(a: &DirectoryEntryRecord, b: &DirectoryEntryRecord, sort: EntrySort) -> Ordering {
    let by_name = || a.name.to_lowercase().cmp(&b.name.to_lowercase());

    match sort {
        EntrySort::NameAsc => by_name(),
        EntrySort::NameDesc => by_name().reverse(),
        EntrySort::SizeAsc => a.size_bytes.cmp(&b.size_bytes).then_with(by_name),
        EntrySort::SizeDesc => b.size_bytes.cmp(&a.size_bytes).then_with(by_name),
        EntrySort::ModifiedAsc => a.modified_at.cmp(&b.modified_at).then_with(by_name),
        EntrySort::ModifiedDesc => b.modified_at.cmp(&a.modified_at).then_with(by_name),
    }
}

/// Enumerate `path` into a fresh snapshot.
///
/// `path` is used as the snapshot location verbatim; callers pass a canonical
/// path (the navigation controller does).
#[instrument(
    name = "snapshot_directory",
    level = "debug",
    fields(path = %path.display(), entries_count, skipped, duration_us)
)]
pub fn snapshot(path: &Path) -> SessionResult<DirectorySnapshot> {
    let start_time: Instant = Instant::now();

    let read_dir: ReadDir = open_directory(path)?;
    let mut entries: Vec<DirectoryEntryRecord> = Vec::new();
    let mut skipped: usize = 0;

    for entry_result in read_dir {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                debug!(error = %e, "Skipping unreadable directory entry");
                skipped += 1;
                continue;
            }
        };

        match DirectoryEntryRecord::extract(&entry) {
            Ok(record) => entries.push(record),

            Err(e) => {
                // Raced with an external delete/rename; keep the rest.
                debug!(entry = %entry.path().display(), error = %e, "Skipping entry without metadata");
                skipped += 1;
            }
        }
    }

    let duration: Duration = start_time.elapsed();
    let span: Span = Span::current();
    span.record("entries_count", entries.len());
    span.record("skipped", skipped);
    span.record("duration_us", duration.as_micros() as u64);

    debug!(
        marker = "DIRECTORY_SNAPSHOT",
        entries_count = entries.len(),
        "Directory snapshot completed in {:?}",
        duration
    );

    Ok(DirectorySnapshot {
        location: path.to_path_buf(),
        entries,
    })
}

fn open_directory(path: &Path) -> SessionResult<ReadDir> {
    match fs::read_dir(path) {
        Ok(read_dir) => Ok(read_dir),

        Err(e) => Err(match e.kind() {
            ErrorKind::NotFound => SessionError::PathNotFound {
                path: path.to_path_buf(),
            },
            ErrorKind::NotADirectory => SessionError::NotADirectory {
                path: path.to_path_buf(),
            },
            // Some platforms report a file passed to read_dir as a generic error.
            _ if path.is_file() => SessionError::NotADirectory {
                path: path.to_path_buf(),
            },
            _ => SessionError::AccessDenied {
                path: path.to_path_buf(),
            },
        }),
    }
}
