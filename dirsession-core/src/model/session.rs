//! src/model/session.rs
//! ============================================================================
//! # Session: one directory session
//!
//! Owns the current [`DirectorySnapshot`] and the [`Clipboard`]. Every
//! mutating call re-validates against the live filesystem, runs through a
//! [`FileSystemOperator`], and re-snapshots the current location on success.
//! A failed call leaves the location and the clipboard as they were.
//!
//! Confirmation is not asked here; callers decide before calling `delete`
//! or an overwriting `paste`.

use crate::config::Config;
use crate::controller::navigation;
use crate::error::{SessionError, SessionResult};
use crate::fs::dir_scanner::{self, DirectorySnapshot};
use crate::fs::entry_record::DirectoryEntryRecord;
use crate::operators::file_system_operator::{
    DEFAULT_SLOW_OPERATION_THRESHOLD, FileSystemOperation, FileSystemOperator, OperationReport,
};
use clipr::{Clipboard, ClipboardOperation, PasteOperation};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

#[derive(Debug)]
pub struct Session {
    snapshot: DirectorySnapshot,
    clipboard: Clipboard,
    slow_threshold: Duration,
}

impl Session {
    /// Open a session at `start`, which must be an existing directory.
    #[instrument(level = "info", fields(start = %start.display()))]
    pub fn open(start: &Path) -> SessionResult<Self> {
        let base: PathBuf = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let location: PathBuf = navigation::resolve(start, &base)?;
        let snapshot: DirectorySnapshot = dir_scanner::snapshot(&location)?;

        info!(location = %location.display(), entries = snapshot.len(), "Session opened");

        Ok(Self {
            snapshot,
            clipboard: Clipboard::new(),
            slow_threshold: DEFAULT_SLOW_OPERATION_THRESHOLD,
        })
    }

    /// Open at the configured `start_dir`, or the process working directory.
    pub fn from_config(config: &Config) -> SessionResult<Self> {
        let start: PathBuf = match &config.start_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().map_err(|e| SessionError::from_io(e, "."))?,
        };

        Ok(Self::open(&start)?.with_slow_threshold(config.operations.slow_operation_threshold))
    }

    #[must_use]
    pub fn with_slow_threshold(mut self, threshold: Duration) -> Self {
        self.slow_threshold = threshold;
        self
    }

    // ------------------------------------------------------------
    // Read side
    // ------------------------------------------------------------

    pub fn location(&self) -> &Path {
        self.snapshot.location()
    }

    pub fn snapshot(&self) -> &DirectorySnapshot {
        &self.snapshot
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Record at `index` of the current snapshot.
    pub fn entry(&self, index: usize) -> SessionResult<&DirectoryEntryRecord> {
        self.snapshot
            .get(index)
            .ok_or(SessionError::InvalidSelection {
                index,
                len: self.snapshot.len(),
            })
    }

    pub fn entry_path(&self, index: usize) -> SessionResult<PathBuf> {
        let record: &DirectoryEntryRecord = self.entry(index)?;

        Ok(self.snapshot.path_of(record))
    }

    // ------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------

    /// Move to `candidate`. The old snapshot stays in place unless the new
    /// one was produced successfully.
    #[instrument(level = "info", skip(self), fields(from = %self.location().display(), candidate = %candidate.display()))]
    pub fn navigate(&mut self, candidate: &Path) -> SessionResult<&DirectorySnapshot> {
        let target: PathBuf = navigation::resolve(candidate, self.location())?;
        let snapshot: DirectorySnapshot = dir_scanner::snapshot(&target)?;

        info!(to = %target.display(), entries = snapshot.len(), "Navigated");
        self.snapshot = snapshot;

        Ok(&self.snapshot)
    }

    /// Re-read the current location.
    pub fn refresh(&mut self) -> SessionResult<&DirectorySnapshot> {
        self.snapshot = dir_scanner::snapshot(self.snapshot.location())?;

        Ok(&self.snapshot)
    }

    /// Go one level up. `Ok(false)` at the filesystem root.
    pub fn go_parent(&mut self) -> SessionResult<bool> {
        let Some(parent) = navigation::parent_of(self.location()).map(Path::to_path_buf) else {
            return Ok(false);
        };

        self.navigate(&parent)?;
        Ok(true)
    }

    // ------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------

    pub fn create_directory(&mut self, name: &str) -> SessionResult<PathBuf> {
        let report: OperationReport = self.run(FileSystemOperation::CreateDirectory {
            parent: self.location().to_path_buf(),
            name: name.to_string(),
        })?;

        Ok(report.path)
    }

    pub fn rename(&mut self, index: usize, new_name: &str) -> SessionResult<PathBuf> {
        let source: PathBuf = self.entry_path(index)?;

        let report: OperationReport = self.run(FileSystemOperation::Rename {
            source,
            new_name: new_name.to_string(),
        })?;

        Ok(report.path)
    }

    /// Delete the entry at `index`. Returns how many filesystem entries went.
    pub fn delete(&mut self, index: usize) -> SessionResult<u64> {
        let path: PathBuf = self.entry_path(index)?;

        let report: OperationReport = self.run(FileSystemOperation::Delete { path })?;

        Ok(report.entries)
    }

    /// Put the entry at `index` on the clipboard. Replaces any held item.
    pub fn mark(&mut self, index: usize, operation: ClipboardOperation) -> SessionResult<PathBuf> {
        let path: PathBuf = self.entry_path(index)?;

        self.clipboard.mark(path.clone(), operation)?;
        info!(path = %path.display(), %operation, "Marked for paste");

        Ok(path)
    }

    /// What `paste` would do right now, without doing it.
    pub fn plan_paste(&self) -> SessionResult<PasteOperation> {
        Ok(self.clipboard.plan_paste(self.location())?)
    }

    /// Paste the held item into the current location.
    ///
    /// Copy mode overwrites an existing destination; move mode refuses one.
    /// The clipboard empties only on success.
    pub fn paste(&mut self) -> SessionResult<PasteOperation> {
        let plan: PasteOperation = self.plan_paste()?;

        let operation: FileSystemOperation = FileSystemOperation::from(&plan.file_operation);

        debug!(
            operation = plan.file_operation.operation_name(),
            destination = %plan.destination_path.display(),
            "Pasting clipboard item"
        );
        self.run(operation)?;
        self.clipboard.complete_paste(&plan);

        Ok(plan)
    }

    fn run(&mut self, operation: FileSystemOperation) -> SessionResult<OperationReport> {
        let report: OperationReport = FileSystemOperator::new(operation)
            .with_slow_threshold(self.slow_threshold)
            .execute()?;

        self.refresh_after_change();

        Ok(report)
    }

    /// The operation already happened; a failed re-read only leaves the
    /// listing stale until the next refresh.
    fn refresh_after_change(&mut self) {
        if let Err(e) = self.refresh() {
            warn!(
                location = %self.location().display(),
                error = %e,
                "Could not refresh after operation"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn session_in(temp_dir: &TempDir) -> Session {
        Session::open(temp_dir.path()).unwrap()
    }

    fn index_of(session: &Session, name: &str) -> usize {
        session
            .snapshot()
            .entries()
            .iter()
            .position(|e| e.name == name)
            .unwrap()
    }

    fn create_test_directory() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), b"alpha").unwrap();
        fs::create_dir(temp_dir.path().join("sub")).unwrap();
        temp_dir
    }

    #[test]
    fn opens_at_canonical_location() {
        let temp_dir = create_test_directory();
        let session = session_in(&temp_dir);

        assert_eq!(session.location(), temp_dir.path().canonicalize().unwrap());
        assert_eq!(session.snapshot().len(), 2);
        assert!(session.clipboard().is_empty());
    }

    #[test]
    fn failed_navigation_keeps_location() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);
        let before = session.location().to_path_buf();

        let err = session.navigate(Path::new("does-not-exist")).unwrap_err();

        assert!(matches!(err, SessionError::InvalidPath { .. }));
        assert_eq!(session.location(), before);
        assert_eq!(session.snapshot().len(), 2);
    }

    #[test]
    fn navigate_and_go_parent() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);
        let root = session.location().to_path_buf();

        session.navigate(Path::new("sub")).unwrap();
        assert_eq!(session.location(), root.join("sub"));
        assert!(session.snapshot().is_empty());

        assert!(session.go_parent().unwrap());
        assert_eq!(session.location(), root);
    }

    #[test]
    fn go_parent_at_root_is_noop() {
        let mut session = Session::open(Path::new("/")).unwrap();

        assert!(!session.go_parent().unwrap());
        assert_eq!(session.location(), Path::new("/"));
    }

    #[test]
    fn refresh_sees_external_changes() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);

        fs::write(temp_dir.path().join("late.txt"), b"").unwrap();
        assert!(session.snapshot().find("late.txt").is_none());

        session.refresh().unwrap();
        assert!(session.snapshot().find("late.txt").is_some());
    }

    #[test]
    fn mutations_refresh_the_listing() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);

        session.create_directory("made").unwrap();
        assert!(session.snapshot().find("made").is_some());

        let idx = index_of(&session, "a.txt");
        session.rename(idx, "b.txt").unwrap();
        assert!(session.snapshot().find("a.txt").is_none());
        assert_eq!(session.snapshot().find("b.txt").unwrap().size_bytes, Some(5));

        let idx = index_of(&session, "sub");
        session.delete(idx).unwrap();
        assert!(session.snapshot().find("sub").is_none());
        assert!(!temp_dir.path().join("sub").exists());
    }

    #[test]
    fn out_of_range_index_is_invalid_selection() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);

        assert!(matches!(
            session.delete(99),
            Err(SessionError::InvalidSelection { index: 99, len: 2 })
        ));
        assert!(matches!(
            session.mark(2, ClipboardOperation::Copy),
            Err(SessionError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn copy_then_paste_into_subdirectory() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);

        let idx = index_of(&session, "a.txt");
        session.mark(idx, ClipboardOperation::Copy).unwrap();
        session.navigate(Path::new("sub")).unwrap();

        let plan = session.paste().unwrap();

        assert_eq!(plan.destination_path, session.location().join("a.txt"));
        assert_eq!(fs::read(temp_dir.path().join("sub/a.txt")).unwrap(), b"alpha");
        assert_eq!(fs::read(temp_dir.path().join("a.txt")).unwrap(), b"alpha");
        assert!(session.clipboard().is_empty());
        assert!(session.snapshot().find("a.txt").is_some());
    }

    #[test]
    fn cut_then_paste_moves() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);

        let idx = index_of(&session, "a.txt");
        session.mark(idx, ClipboardOperation::Move).unwrap();
        session.navigate(Path::new("sub")).unwrap();
        session.paste().unwrap();

        assert!(!temp_dir.path().join("a.txt").exists());
        assert!(temp_dir.path().join("sub/a.txt").exists());
    }

    #[test]
    fn failed_paste_keeps_clipboard() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);

        let idx = index_of(&session, "a.txt");
        session.mark(idx, ClipboardOperation::Move).unwrap();
        fs::remove_file(temp_dir.path().join("a.txt")).unwrap();
        session.navigate(Path::new("sub")).unwrap();

        let err = session.paste().unwrap_err();

        assert!(matches!(err, SessionError::PathNotFound { .. }));
        assert_eq!(session.clipboard().operation(), Some(ClipboardOperation::Move));
    }

    #[test]
    fn pasting_a_move_onto_itself_is_refused() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);

        let idx = index_of(&session, "a.txt");
        session.mark(idx, ClipboardOperation::Move).unwrap();

        let err = session.paste().unwrap_err();

        assert!(matches!(err, SessionError::AlreadyExists { .. }));
        assert!(!session.clipboard().is_empty());
        assert_eq!(fs::read(temp_dir.path().join("a.txt")).unwrap(), b"alpha");
    }

    #[test]
    fn empty_clipboard_paste_is_an_error() {
        let temp_dir = create_test_directory();
        let mut session = session_in(&temp_dir);

        assert!(matches!(session.paste(), Err(SessionError::Clipboard(_))));
    }

    #[cfg(unix)]
    #[test]
    fn navigating_into_unreadable_directory_keeps_location() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = create_test_directory();
        let locked = temp_dir.path().join("sub");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let mut session = session_in(&temp_dir);
        let before = session.location().to_path_buf();
        let result = session.navigate(Path::new("sub")).map(|_| ());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(SessionError::AccessDenied { .. })), "{result:?}");
        assert_eq!(session.location(), before);
        assert_eq!(session.snapshot().len(), 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn delete_targets_exact_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"bad\xffname");
        fs::write(temp_dir.path().join(raw), b"x").unwrap();
        fs::write(temp_dir.path().join("bad\u{fffd}name"), b"decoy").unwrap();
        let mut session = session_in(&temp_dir);

        let idx = session
            .snapshot()
            .entries()
            .iter()
            .position(|e| e.file_name() == raw)
            .unwrap();
        session.delete(idx).unwrap();

        assert!(!temp_dir.path().join(raw).exists());
        assert_eq!(fs::read(temp_dir.path().join("bad\u{fffd}name")).unwrap(), b"decoy");
        assert_eq!(session.snapshot().len(), 1);
    }

    #[test]
    fn from_config_honours_start_dir() {
        let temp_dir = create_test_directory();
        let config = Config {
            start_dir: Some(temp_dir.path().join("sub")),
            ..Config::default()
        };

        let session = Session::from_config(&config).unwrap();

        assert_eq!(
            session.location(),
            temp_dir.path().join("sub").canonicalize().unwrap()
        );
    }
}
