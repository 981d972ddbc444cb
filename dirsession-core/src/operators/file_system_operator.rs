//! ``src/operators/file_system_operator.rs``
//!
//! Session -> Action Dispatcher -> Operator
//!
//! Executes the mutating filesystem operations: create-directory, rename,
//! delete, copy and move. The operator never asks for confirmation; callers
//! obtain it before building a destructive operation. Every precondition is
//! re-checked against the live filesystem at call time.

use crate::error::{SessionError, SessionResult};
use clipr::FileOperation;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{Span, debug, error, info, instrument, warn};
use walkdir::{DirEntry as WalkEntry, WalkDir};

pub const DEFAULT_SLOW_OPERATION_THRESHOLD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemOperation {
    CreateDirectory { parent: PathBuf, name: String },

    Rename { source: PathBuf, new_name: String },

    Delete { path: PathBuf },

    Copy { source: PathBuf, dest: PathBuf },

    Move { source: PathBuf, dest: PathBuf },
}

impl FileSystemOperation {
    /// Get operation name for logging
    pub fn operation_name(&self) -> &'static str {
        match self {
            FileSystemOperation::CreateDirectory { .. } => "create_directory",
            FileSystemOperation::Rename { .. } => "rename",
            FileSystemOperation::Delete { .. } => "delete",
            FileSystemOperation::Copy { .. } => "copy",
            FileSystemOperation::Move { .. } => "move",
        }
    }

    /// Get primary path for logging
    pub fn primary_path(&self) -> &Path {
        match self {
            FileSystemOperation::CreateDirectory { parent: path, .. }
            | FileSystemOperation::Rename { source: path, .. }
            | FileSystemOperation::Delete { path }
            | FileSystemOperation::Copy { source: path, .. }
            | FileSystemOperation::Move { source: path, .. } => path,
        }
    }
}

impl From<&FileOperation> for FileSystemOperation {
    fn from(op: &FileOperation) -> Self {
        let source: PathBuf = op.source_path().to_path_buf();
        let dest: PathBuf = op.dest_path().to_path_buf();

        match op {
            FileOperation::Copy { .. } => Self::Copy { source, dest },
            FileOperation::Move { .. } => Self::Move { source, dest },
        }
    }
}

impl std::fmt::Display for FileSystemOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSystemOperation::CreateDirectory { parent, name } => {
                write!(f, "CreateDirectory({}/{})", parent.display(), name)
            }

            FileSystemOperation::Rename { source, new_name } => {
                write!(f, "Rename({} -> {})", source.display(), new_name)
            }

            FileSystemOperation::Delete { path } => write!(f, "Delete({})", path.display()),

            FileSystemOperation::Copy { source, dest } => {
                write!(f, "Copy({} -> {})", source.display(), dest.display())
            }

            FileSystemOperation::Move { source, dest } => {
                write!(f, "Move({} -> {})", source.display(), dest.display())
            }
        }
    }
}

/// Summary of a completed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationReport {
    pub operation_id: String,
    /// Path that exists (or no longer exists, for delete) afterwards.
    pub path: PathBuf,
    /// Filesystem entries created, copied, or removed.
    pub entries: u64,
    pub duration: Duration,
}

/// Runs one [`FileSystemOperation`] synchronously with tracing.
#[derive(Debug, Clone)]
pub struct FileSystemOperator {
    pub operation_id: String,
    pub operation: FileSystemOperation,
    pub slow_threshold: Duration,
}

impl FileSystemOperator {
    pub fn new(operation: FileSystemOperation) -> Self {
        let operation_id: String = nanoid::nanoid!();

        debug!(operation_id = %operation_id, operation = %operation, "Created file system operation");

        Self {
            operation_id,
            operation,
            slow_threshold: DEFAULT_SLOW_OPERATION_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    #[instrument(
        name = "file_operation_execute",
        level = "info",
        fields(
            operation_id = %self.operation_id,
            operation_type = self.operation.operation_name(),
            operation_path = %self.operation.primary_path().display(),
            duration_ms,
            success,
        ),
        skip(self)
    )]
    pub fn execute(&self) -> SessionResult<OperationReport> {
        let start_time: Instant = Instant::now();
        let span: Span = Span::current();

        let result: SessionResult<(PathBuf, u64)> = match &self.operation {
            FileSystemOperation::CreateDirectory { parent, name } => {
                create_directory(parent, name).map(|p| (p, 1))
            }
            FileSystemOperation::Rename { source, new_name } => {
                rename(source, new_name).map(|p| (p, 1))
            }
            FileSystemOperation::Delete { path } => delete(path).map(|n| (path.clone(), n)),
            FileSystemOperation::Copy { source, dest } => copy(source, dest).map(|n| (dest.clone(), n)),
            FileSystemOperation::Move { source, dest } => move_entry(source, dest).map(|p| (p, 1)),
        };

        let duration: Duration = start_time.elapsed();
        span.record("duration_ms", duration.as_millis() as u64);
        span.record("success", result.is_ok());

        match result {
            Ok((path, entries)) => {
                info!(
                    operation_id = %self.operation_id,
                    duration_ms = duration.as_millis() as u64,
                    entries,
                    "File system operation completed successfully"
                );

                if duration > self.slow_threshold {
                    warn!(
                        marker = "SLOW_FILE_OPERATION",
                        operation_id = %self.operation_id,
                        duration_ms = duration.as_millis() as u64,
                        "{} took longer than {:?}",
                        self.operation,
                        self.slow_threshold
                    );
                }

                Ok(OperationReport {
                    operation_id: self.operation_id.clone(),
                    path,
                    entries,
                    duration,
                })
            }

            Err(e) => {
                error!(
                    operation_id = %self.operation_id,
                    error_kind = e.kind_label(),
                    error = %e,
                    "File system operation failed"
                );

                Err(e)
            }
        }
    }
}

// ------------------------------------------------------------
// Operations
// ------------------------------------------------------------

/// Reject names that would escape the parent directory.
pub fn validate_name(name: &str) -> SessionResult<()> {
    let mut components = Path::new(name).components();

    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if name.is_empty() || !single_normal || name.contains('/') || name.contains(std::path::MAIN_SEPARATOR)
    {
        return Err(SessionError::invalid_name(name));
    }

    Ok(())
}

/// Create exactly one directory level: `parent/name`.
#[instrument(level = "debug", fields(parent = %parent.display(), name = %name))]
pub fn create_directory(parent: &Path, name: &str) -> SessionResult<PathBuf> {
    validate_name(name)?;
    require_directory(parent)?;

    let target: PathBuf = parent.join(name);

    if exists_no_follow(&target) {
        return Err(SessionError::AlreadyExists { path: target });
    }

    fs::create_dir(&target).map_err(|e| SessionError::from_io(e, &target))?;

    info!(path = %target.display(), "Directory created successfully");
    Ok(target)
}

/// Rename `source` within its own parent directory.
#[instrument(level = "debug", fields(source = %source.display(), new_name = %new_name))]
pub fn rename(source: &Path, new_name: &str) -> SessionResult<PathBuf> {
    validate_name(new_name)?;
    require_exists(source)?;

    let parent: &Path = source
        .parent()
        .ok_or_else(|| SessionError::invalid_path(source, "cannot rename the filesystem root"))?;
    let new_path: PathBuf = parent.join(new_name);

    if exists_no_follow(&new_path) {
        return Err(SessionError::AlreadyExists { path: new_path });
    }

    fs::rename(source, &new_path).map_err(|e| SessionError::from_io_pair(e, source, &new_path))?;

    info!(
        source = %source.display(),
        destination = %new_path.display(),
        "Rename completed successfully"
    );
    Ok(new_path)
}

/// Remove a file, a symlink, or a whole directory tree.
///
/// Recursive removal stops at the first failure and reports that entry. What
/// was already removed stays removed.
#[instrument(level = "debug", fields(path = %path.display()))]
pub fn delete(path: &Path) -> SessionResult<u64> {
    let meta: Metadata = require_exists(path)?;

    if !meta.is_dir() {
        fs::remove_file(path).map_err(|e| SessionError::from_io(e, path))?;
        info!(path = %path.display(), "File deleted successfully");
        return Ok(1);
    }

    let mut removed: u64 = 0;

    for entry in WalkDir::new(path).follow_links(false).contents_first(true) {
        let entry: WalkEntry = entry.map_err(|e| walk_error(e, path))?;

        let outcome: io::Result<()> = if entry.file_type().is_dir() {
            fs::remove_dir(entry.path())
        } else {
            fs::remove_file(entry.path())
        };

        if let Err(e) = outcome {
            warn!(
                marker = "PARTIAL_DELETE",
                failed = %entry.path().display(),
                removed,
                "Recursive delete stopped part way"
            );
            return Err(SessionError::from_io(e, entry.path()));
        }

        removed += 1;
    }

    info!(path = %path.display(), removed, "Directory deleted successfully");
    Ok(removed)
}

/// Copy `source` to `dest`, overwriting existing files at `dest`.
///
/// Directories are copied recursively (symlinks followed); existing
/// directories at the destination are merged into. A failure part way leaves
/// what was already copied in place.
#[instrument(level = "debug", fields(source = %source.display(), dest = %dest.display()))]
pub fn copy(source: &Path, dest: &Path) -> SessionResult<u64> {
    let source_meta: Metadata = fs::metadata(source).map_err(|e| SessionError::from_io(e, source))?;

    if same_entry(source, dest) {
        return Err(SessionError::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }

    let dest_meta: Option<Metadata> = fs::metadata(dest).ok();

    if source_meta.is_dir() {
        if dest_meta.as_ref().is_some_and(|m| !m.is_dir()) {
            return Err(SessionError::AlreadyExists {
                path: dest.to_path_buf(),
            });
        }

        if is_inside(source, dest) {
            return Err(SessionError::invalid_path(
                dest,
                "cannot copy a directory into itself",
            ));
        }

        return copy_tree(source, dest);
    }

    if dest_meta.as_ref().is_some_and(Metadata::is_dir) {
        return Err(SessionError::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }

    copy_file(source, dest)?;
    info!(source = %source.display(), dest = %dest.display(), "File copied successfully");
    Ok(1)
}

/// Move `source` to `dest` with a single rename.
///
/// There is deliberately no copy+delete fallback: a move across devices fails
/// with `CrossDeviceUnsupported` and leaves the source untouched.
#[instrument(level = "debug", fields(source = %source.display(), dest = %dest.display()))]
pub fn move_entry(source: &Path, dest: &Path) -> SessionResult<PathBuf> {
    let source_meta: Metadata = require_exists(source)?;

    if same_entry(source, dest) || exists_no_follow(dest) {
        return Err(SessionError::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }

    let dest_parent: &Path = dest
        .parent()
        .ok_or_else(|| SessionError::invalid_path(dest, "destination has no parent directory"))?;
    let parent_meta: Metadata = require_directory(dest_parent)?;

    if source_meta.is_dir() && is_inside(source, dest) {
        return Err(SessionError::invalid_path(
            dest,
            "cannot move a directory into itself",
        ));
    }

    if !same_device(&source_meta, &parent_meta) {
        return Err(SessionError::CrossDeviceUnsupported {
            source_path: source.to_path_buf(),
            dest_path: dest.to_path_buf(),
        });
    }

    fs::rename(source, dest).map_err(|e| SessionError::from_io_pair(e, source, dest))?;

    info!(source = %source.display(), dest = %dest.display(), "Move completed successfully");
    Ok(dest.to_path_buf())
}

// ------------------------------------------------------------
// Helpers
// ------------------------------------------------------------

fn copy_tree(source: &Path, dest: &Path) -> SessionResult<u64> {
    let mut copied: u64 = 0;

    for entry in WalkDir::new(source).follow_links(true) {
        let entry: WalkEntry = entry.map_err(|e| walk_error(e, source))?;

        let relative: &Path = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| SessionError::invalid_path(entry.path(), "entry escaped the copy root"))?;
        let target: PathBuf = dest.join(relative);

        if entry.file_type().is_dir() {
            match fs::symlink_metadata(&target) {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => return Err(SessionError::AlreadyExists { path: target }),
                Err(_) => fs::create_dir(&target).map_err(|e| SessionError::from_io(e, &target))?,
            }
        } else {
            copy_file(entry.path(), &target)?;
        }

        copied += 1;
    }

    info!(source = %source.display(), dest = %dest.display(), copied, "Directory copied successfully");
    Ok(copied)
}

fn copy_file(source: &Path, dest: &Path) -> SessionResult<()> {
    fs::copy(source, dest).map(|_| ()).map_err(|e| {
        // NotFound may be either end; report the one that is actually missing.
        if e.kind() == io::ErrorKind::NotFound && !source.exists() {
            SessionError::PathNotFound {
                path: source.to_path_buf(),
            }
        } else {
            SessionError::from_io(e, dest)
        }
    })
}

fn walk_error(err: walkdir::Error, root: &Path) -> SessionError {
    let path: PathBuf = err.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf);

    if err.loop_ancestor().is_some() {
        return SessionError::invalid_path(path, "symlink loop");
    }

    match err.into_io_error() {
        Some(io_err) => SessionError::from_io(io_err, path),
        None => SessionError::invalid_path(path, "directory walk failed"),
    }
}

fn require_exists(path: &Path) -> SessionResult<Metadata> {
    fs::symlink_metadata(path).map_err(|e| SessionError::from_io(e, path))
}

fn require_directory(path: &Path) -> SessionResult<Metadata> {
    let meta: Metadata = fs::metadata(path).map_err(|e| SessionError::from_io(e, path))?;

    if !meta.is_dir() {
        return Err(SessionError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(meta)
}

fn exists_no_follow(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Canonical form of a path that may not exist yet: canonical parent + name.
fn resolve_target(path: &Path) -> Option<PathBuf> {
    if let Ok(canonical) = path.canonicalize() {
        return Some(canonical);
    }

    let parent: &Path = path.parent()?;
    let name = path.file_name()?;

    parent.canonicalize().ok().map(|p| p.join(name))
}

fn same_entry(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// True when `candidate` would land at or below directory `dir`.
fn is_inside(dir: &Path, candidate: &Path) -> bool {
    match (dir.canonicalize(), resolve_target(candidate)) {
        (Ok(dir), Some(candidate)) => candidate.starts_with(dir),
        _ => false,
    }
}

#[cfg(unix)]
fn same_device(a: &Metadata, b: &Metadata) -> bool {
    use std::os::unix::fs::MetadataExt;

    a.dev() == b.dev()
}

#[cfg(not(unix))]
fn same_device(_a: &Metadata, _b: &Metadata) -> bool {
    // No portable device id; rename reports the cross-device error itself.
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_directory() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path();

        fs::write(path.join("file1.txt"), b"hello").unwrap();
        fs::write(path.join("file2.txt"), b"world").unwrap();
        fs::create_dir(path.join("subdir")).unwrap();
        fs::create_dir(path.join("subdir").join("deeper")).unwrap();
        fs::write(path.join("subdir").join("a.txt"), b"a").unwrap();
        fs::write(path.join("subdir").join("deeper").join("b.txt"), b"b").unwrap();

        temp_dir
    }

    #[test]
    fn names_with_separators_are_rejected() {
        assert!(validate_name("ok.txt").is_ok());
        for bad in ["", ".", "..", "a/b", "/abs"] {
            assert!(
                matches!(validate_name(bad), Err(SessionError::InvalidName { .. })),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn create_directory_is_single_level() {
        let temp_dir = TempDir::new().unwrap();
        let created = create_directory(temp_dir.path(), "new_directory").unwrap();

        assert!(created.is_dir());
        assert_eq!(created, temp_dir.path().join("new_directory"));
    }

    #[test]
    fn create_directory_refuses_existing_name() {
        let temp_dir = create_test_directory();
        let err = create_directory(temp_dir.path(), "file1.txt").unwrap_err();

        assert!(matches!(err, SessionError::AlreadyExists { .. }));
        assert!(temp_dir.path().join("file1.txt").is_file());
    }

    #[test]
    fn create_directory_needs_directory_parent() {
        let temp_dir = create_test_directory();

        let err = create_directory(&temp_dir.path().join("file1.txt"), "x").unwrap_err();
        assert!(matches!(err, SessionError::NotADirectory { .. }));

        let err = create_directory(&temp_dir.path().join("missing"), "x").unwrap_err();
        assert!(matches!(err, SessionError::PathNotFound { .. }));
    }

    #[test]
    fn rename_moves_name_within_parent() {
        let temp_dir = create_test_directory();
        let old = temp_dir.path().join("file1.txt");

        let renamed = rename(&old, "renamed.txt").unwrap();

        assert!(!old.exists());
        assert_eq!(fs::read(&renamed).unwrap(), b"hello");
    }

    #[test]
    fn rename_onto_existing_name_changes_nothing() {
        let temp_dir = create_test_directory();
        let old = temp_dir.path().join("file1.txt");

        let err = rename(&old, "file2.txt").unwrap_err();

        assert!(matches!(err, SessionError::AlreadyExists { .. }));
        assert_eq!(fs::read(&old).unwrap(), b"hello");
        assert_eq!(fs::read(temp_dir.path().join("file2.txt")).unwrap(), b"world");
    }

    #[test]
    fn rename_missing_source_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = rename(&temp_dir.path().join("ghost"), "x").unwrap_err();

        assert!(matches!(err, SessionError::PathNotFound { .. }));
    }

    #[test]
    fn delete_removes_whole_tree() {
        let temp_dir = create_test_directory();
        let subdir = temp_dir.path().join("subdir");

        let removed = delete(&subdir).unwrap();

        assert!(!subdir.exists());
        // subdir, deeper, a.txt, b.txt
        assert_eq!(removed, 4);
    }

    #[test]
    fn delete_single_file() {
        let temp_dir = create_test_directory();
        let file = temp_dir.path().join("file2.txt");

        assert_eq!(delete(&file).unwrap(), 1);
        assert!(!file.exists());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = delete(&temp_dir.path().join("ghost")).unwrap_err();

        assert!(matches!(err, SessionError::PathNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn delete_symlink_keeps_target() {
        let temp_dir = create_test_directory();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(temp_dir.path().join("subdir"), &link).unwrap();

        delete(&link).unwrap();

        assert!(!link.exists());
        assert!(temp_dir.path().join("subdir").join("a.txt").exists());
    }

    #[test]
    fn copy_file_overwrites_destination() {
        let temp_dir = create_test_directory();
        let source = temp_dir.path().join("file1.txt");
        let dest = temp_dir.path().join("file2.txt");

        copy(&source, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"hello");
        assert_eq!(fs::read(&source).unwrap(), b"hello");
    }

    #[test]
    fn copy_directory_preserves_structure() {
        let temp_dir = create_test_directory();
        let dest = temp_dir.path().join("copy_of_subdir");

        let copied = copy(&temp_dir.path().join("subdir"), &dest).unwrap();

        assert_eq!(copied, 4);
        assert_eq!(fs::read(dest.join("a.txt")).unwrap(), b"a");
        assert_eq!(fs::read(dest.join("deeper").join("b.txt")).unwrap(), b"b");
    }

    #[test]
    fn copy_onto_itself_is_refused() {
        let temp_dir = create_test_directory();
        let file = temp_dir.path().join("file1.txt");

        let err = copy(&file, &file).unwrap_err();

        assert!(matches!(err, SessionError::AlreadyExists { .. }));
        assert_eq!(fs::read(&file).unwrap(), b"hello");
    }

    #[test]
    fn copy_directory_into_itself_is_refused() {
        let temp_dir = create_test_directory();
        let subdir = temp_dir.path().join("subdir");

        let err = copy(&subdir, &subdir.join("deeper").join("loop")).unwrap_err();

        assert!(matches!(err, SessionError::InvalidPath { .. }));
        assert!(!subdir.join("deeper").join("loop").exists());
    }

    #[test]
    fn copy_missing_source_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = copy(&temp_dir.path().join("ghost"), &temp_dir.path().join("x")).unwrap_err();

        assert!(matches!(err, SessionError::PathNotFound { .. }));
    }

    #[test]
    fn move_to_other_directory() {
        let temp_dir = create_test_directory();
        let source = temp_dir.path().join("file1.txt");
        let dest = temp_dir.path().join("subdir").join("file1.txt");

        move_entry(&source, &dest).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"hello");
    }

    #[test]
    fn move_refuses_existing_destination() {
        let temp_dir = create_test_directory();
        let source = temp_dir.path().join("file1.txt");
        let dest = temp_dir.path().join("file2.txt");

        let err = move_entry(&source, &dest).unwrap_err();

        assert!(matches!(err, SessionError::AlreadyExists { .. }));
        assert_eq!(fs::read(&source).unwrap(), b"hello");
        assert_eq!(fs::read(&dest).unwrap(), b"world");
    }

    #[test]
    fn move_directory_into_itself_is_refused() {
        let temp_dir = create_test_directory();
        let subdir = temp_dir.path().join("subdir");

        let err = move_entry(&subdir, &subdir.join("deeper").join("subdir")).unwrap_err();

        assert!(matches!(err, SessionError::InvalidPath { .. }));
        assert!(subdir.join("a.txt").exists());
    }

    /// Needs two filesystems; `/dev/shm` is a tmpfs on most Linux hosts.
    #[cfg(target_os = "linux")]
    #[test]
    fn move_across_devices_is_unsupported() {
        use std::os::unix::fs::MetadataExt;

        let shm = Path::new("/dev/shm");
        let Ok(other) = tempfile::tempdir_in(shm) else {
            return;
        };
        let temp_dir = create_test_directory();

        let dev_a = fs::metadata(temp_dir.path()).unwrap().dev();
        let dev_b = fs::metadata(other.path()).unwrap().dev();
        if dev_a == dev_b {
            return;
        }

        let source = temp_dir.path().join("file1.txt");
        let dest = other.path().join("file1.txt");

        let err = move_entry(&source, &dest).unwrap_err();

        assert!(matches!(err, SessionError::CrossDeviceUnsupported { .. }));
        assert_eq!(fs::read(&source).unwrap(), b"hello");
        assert!(!dest.exists());
    }

    #[test]
    fn operator_reports_created_path() {
        let temp_dir = TempDir::new().unwrap();
        let operator = FileSystemOperator::new(FileSystemOperation::CreateDirectory {
            parent: temp_dir.path().to_path_buf(),
            name: "made".to_string(),
        });

        let report = operator.execute().unwrap();

        assert_eq!(report.path, temp_dir.path().join("made"));
        assert_eq!(report.entries, 1);
        assert_eq!(report.operation_id, operator.operation_id);
    }

    #[test]
    fn operator_propagates_failure() {
        let temp_dir = TempDir::new().unwrap();
        let operator = FileSystemOperator::new(FileSystemOperation::Delete {
            path: temp_dir.path().join("ghost"),
        })
        .with_slow_threshold(Duration::from_millis(1));

        let err = operator.execute().unwrap_err();

        assert_eq!(err.kind_label(), "path_not_found");
    }

    #[test]
    fn operation_display_and_names() {
        let op = FileSystemOperation::Rename {
            source: PathBuf::from("/tmp/a"),
            new_name: "b".to_string(),
        };

        assert_eq!(op.operation_name(), "rename");
        assert_eq!(op.primary_path(), Path::new("/tmp/a"));
        assert_eq!(op.to_string(), "Rename(/tmp/a -> b)");
    }
}
