//! ActionDispatcher: runs one [`Action`] against a [`Session`].
//!
//! The dispatcher is where host interaction and filesystem work meet: it asks
//! the [`Host`] for missing names and confirmations, then calls the session.
//! Handlers are split by concern:
//! - `navigation_dispatcher`: navigate, activate, go-parent, refresh
//! - `fs_dispatcher`: create-directory, rename, delete
//! - `clipboard_dispatcher`: copy, cut, paste

use std::fmt;
use std::path::PathBuf;

use clipr::ClipboardOperation;
use tracing::{debug, instrument, warn};

use crate::controller::Action;
use crate::controller::traits::Host;
use crate::error::SessionResult;
use crate::model::session::Session;

pub mod clipboard_dispatcher;
pub mod fs_dispatcher;
pub mod navigation_dispatcher;

/// What a dispatched action ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Navigated { location: PathBuf },

    /// Already at the filesystem root.
    AtRoot,

    Refreshed { entries: usize },

    /// `launched` is false when the host found nothing to open the file with.
    Opened { path: PathBuf, launched: bool },

    Created { path: PathBuf },

    Renamed { from: PathBuf, to: PathBuf },

    Deleted { path: PathBuf, removed: u64 },

    Marked {
        path: PathBuf,
        operation: ClipboardOperation,
    },

    Pasted {
        source: PathBuf,
        dest: PathBuf,
        operation: ClipboardOperation,
    },

    /// The user declined a prompt; nothing changed.
    Cancelled,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigated { location } => write!(f, "{}", location.display()),
            Self::AtRoot => write!(f, "Already at the root"),
            Self::Refreshed { entries } => write!(f, "Refreshed ({entries} entries)"),
            Self::Opened { path, launched: true } => write!(f, "Opened {}", path.display()),
            Self::Opened { path, launched: false } => {
                write!(f, "No application could open {}", path.display())
            }
            Self::Created { path } => write!(f, "Created {}", path.display()),
            Self::Renamed { from, to } => write!(f, "Renamed {} -> {}", from.display(), to.display()),
            Self::Deleted { path, removed } => {
                write!(f, "Deleted {} ({removed} entries)", path.display())
            }
            Self::Marked {
                path,
                operation: ClipboardOperation::Copy,
            } => write!(f, "Copy: {}", path.display()),
            Self::Marked {
                path,
                operation: ClipboardOperation::Move,
            } => write!(f, "Cut: {}", path.display()),
            Self::Pasted {
                dest,
                operation: ClipboardOperation::Copy,
                ..
            } => write!(f, "Copied: {}", dest.display()),
            Self::Pasted {
                dest,
                operation: ClipboardOperation::Move,
                ..
            } => write!(f, "Moved: {}", dest.display()),
            Self::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Borrows the session and host for the duration of one or more dispatches.
pub struct ActionDispatcher<'a, H: Host + ?Sized> {
    session: &'a mut Session,
    host: &'a mut H,
}

impl<'a, H: Host + ?Sized> ActionDispatcher<'a, H> {
    pub fn new(session: &'a mut Session, host: &'a mut H) -> Self {
        Self { session, host }
    }

    #[instrument(level = "debug", skip(self, action), fields(action = action.name()))]
    pub fn dispatch(&mut self, action: Action) -> SessionResult<Outcome> {
        let result: SessionResult<Outcome> = match action {
            Action::Navigate(path) => self.handle_navigate(&path),
            Action::Activate(index) => self.handle_activate(index),
            Action::GoParent => self.handle_go_parent(),
            Action::Refresh => self.handle_refresh(),

            Action::CreateDirectory(name) => self.handle_create_directory(name),
            Action::Rename { index, new_name } => self.handle_rename(index, new_name),
            Action::Delete(index) => self.handle_delete(index),

            Action::Copy(index) => self.handle_mark(index, ClipboardOperation::Copy),
            Action::Cut(index) => self.handle_mark(index, ClipboardOperation::Move),
            Action::Paste => self.handle_paste(),
        };

        match &result {
            Ok(outcome) => debug!(%outcome, "Action dispatched"),
            Err(e) => warn!(error_kind = e.kind_label(), error = %e, "Action failed"),
        }

        result
    }
}
