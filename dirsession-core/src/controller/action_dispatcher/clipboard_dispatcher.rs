//! Clipboard actions: mark for copy or cut, then paste.

use std::fs;
use std::path::PathBuf;

use clipr::{ClipboardOperation, PasteOperation};
use tracing::{debug, instrument};

use super::{ActionDispatcher, Outcome};
use crate::controller::traits::{Host, PromptKind};
use crate::error::SessionResult;

impl<H: Host + ?Sized> ActionDispatcher<'_, H> {
    pub(super) fn handle_mark(
        &mut self,
        index: usize,
        operation: ClipboardOperation,
    ) -> SessionResult<Outcome> {
        let path: PathBuf = self.session.mark(index, operation)?;

        Ok(Outcome::Marked { path, operation })
    }

    /// A copy onto an existing name asks before overwriting. A move onto an
    /// existing name is left to fail in the engine.
    #[instrument(level = "debug", skip(self))]
    pub(super) fn handle_paste(&mut self) -> SessionResult<Outcome> {
        let plan: PasteOperation = self.session.plan_paste()?;

        let dest_exists: bool = fs::symlink_metadata(&plan.destination_path).is_ok();

        if plan.operation_type == ClipboardOperation::Copy
            && dest_exists
            && plan.source_path != plan.destination_path
            && !self.host.confirm(PromptKind::Overwrite {
                path: plan.destination_path.clone(),
            })
        {
            debug!(dest = %plan.destination_path.display(), "Overwrite declined");
            return Ok(Outcome::Cancelled);
        }

        let done: PasteOperation = self.session.paste()?;

        Ok(Outcome::Pasted {
            source: done.source_path,
            dest: done.destination_path,
            operation: done.operation_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::ScriptedHost;
    use super::*;
    use crate::controller::Action;
    use crate::error::SessionError;
    use crate::model::session::Session;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, Session) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), b"new").unwrap();
        fs::create_dir(temp_dir.path().join("dst")).unwrap();
        fs::write(temp_dir.path().join("dst").join("a.txt"), b"old").unwrap();
        let session = Session::open(temp_dir.path()).unwrap();
        (temp_dir, session)
    }

    fn index_of(session: &Session, name: &str) -> usize {
        session
            .snapshot()
            .entries()
            .iter()
            .position(|e| e.name == name)
            .unwrap()
    }

    fn mark_and_enter_dst(session: &mut Session, host: &mut ScriptedHost, action: Action) {
        let mut dispatcher = ActionDispatcher::new(session, host);
        dispatcher.dispatch(action).unwrap();
        dispatcher.dispatch(Action::Navigate(PathBuf::from("dst"))).unwrap();
    }

    #[test]
    fn copy_overwrite_declined_keeps_both() {
        let (temp_dir, mut session) = fixture();
        let a = index_of(&session, "a.txt");
        let mut host = ScriptedHost::confirming(&[false]);
        mark_and_enter_dst(&mut session, &mut host, Action::Copy(a));

        let outcome = ActionDispatcher::new(&mut session, &mut host)
            .dispatch(Action::Paste)
            .unwrap();

        assert_eq!(outcome, Outcome::Cancelled);
        assert_eq!(fs::read(temp_dir.path().join("dst/a.txt")).unwrap(), b"old");
        assert_eq!(session.clipboard().operation(), Some(ClipboardOperation::Copy));
    }

    #[test]
    fn copy_overwrite_confirmed_replaces() {
        let (temp_dir, mut session) = fixture();
        let a = index_of(&session, "a.txt");
        let mut host = ScriptedHost::confirming(&[true]);
        mark_and_enter_dst(&mut session, &mut host, Action::Copy(a));

        let outcome = ActionDispatcher::new(&mut session, &mut host)
            .dispatch(Action::Paste)
            .unwrap();

        assert!(matches!(
            outcome,
            Outcome::Pasted {
                operation: ClipboardOperation::Copy,
                ..
            }
        ));
        assert_eq!(fs::read(temp_dir.path().join("dst/a.txt")).unwrap(), b"new");
        assert!(session.clipboard().is_empty());
        assert_eq!(host.asked.len(), 1);
    }

    #[test]
    fn move_onto_existing_fails_without_prompt() {
        let (temp_dir, mut session) = fixture();
        let a = index_of(&session, "a.txt");
        let mut host = ScriptedHost::default();
        mark_and_enter_dst(&mut session, &mut host, Action::Cut(a));

        let err = ActionDispatcher::new(&mut session, &mut host)
            .dispatch(Action::Paste)
            .unwrap_err();

        assert!(matches!(err, SessionError::AlreadyExists { .. }));
        assert!(host.asked.is_empty());
        assert!(temp_dir.path().join("a.txt").exists());
        let held = temp_dir.path().canonicalize().unwrap().join("a.txt");
        assert_eq!(session.clipboard().source_path(), Some(held.as_path()));
    }

    #[test]
    fn paste_without_mark_is_clipboard_error() {
        let (_temp_dir, mut session) = fixture();
        let mut host = ScriptedHost::default();

        let err = ActionDispatcher::new(&mut session, &mut host)
            .dispatch(Action::Paste)
            .unwrap_err();

        assert!(matches!(err, SessionError::Clipboard(clipr::ClipError::NothingToPaste)));
    }

    #[test]
    fn last_mark_wins() {
        let (temp_dir, mut session) = fixture();
        fs::write(temp_dir.path().join("z.txt"), b"z").unwrap();
        session.refresh().unwrap();
        let a = index_of(&session, "a.txt");
        let z = index_of(&session, "z.txt");
        let mut host = ScriptedHost::default();

        let mut dispatcher = ActionDispatcher::new(&mut session, &mut host);
        dispatcher.dispatch(Action::Copy(a)).unwrap();
        dispatcher.dispatch(Action::Cut(z)).unwrap();
        dispatcher.dispatch(Action::Navigate(PathBuf::from("dst"))).unwrap();
        dispatcher.dispatch(Action::Paste).unwrap();

        assert!(temp_dir.path().join("dst/z.txt").exists());
        assert!(!temp_dir.path().join("z.txt").exists());
        assert_eq!(fs::read(temp_dir.path().join("dst/a.txt")).unwrap(), b"old");
    }
}
