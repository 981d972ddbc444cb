//! src/controller/actions.rs
//! ============================================================================
//! # Actions: everything a host can ask the session to do
//!
//! Entries are addressed by their index in the current snapshot. Text the
//! user still has to supply (a new folder name, a new file name) is optional:
//! `None` makes the dispatcher ask the host for it.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Go to a typed path (relative, absolute, or `~`-prefixed).
    Navigate(PathBuf),

    /// Enter a directory entry or open a file entry.
    Activate(usize),

    /// Go to parent directory.
    GoParent,

    /// Re-read the current directory.
    Refresh,

    CreateDirectory(Option<String>),

    Rename {
        index: usize,
        new_name: Option<String>,
    },

    /// Delete after confirmation.
    Delete(usize),

    /// Mark for copy.
    Copy(usize),

    /// Mark for move.
    Cut(usize),

    /// Paste the clipboard into the current directory.
    Paste,
}

impl Action {
    /// Get action name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Navigate(_) => "navigate",
            Self::Activate(_) => "activate",
            Self::GoParent => "go_parent",
            Self::Refresh => "refresh",
            Self::CreateDirectory(_) => "create_directory",
            Self::Rename { .. } => "rename",
            Self::Delete(_) => "delete",
            Self::Copy(_) => "copy",
            Self::Cut(_) => "cut",
            Self::Paste => "paste",
        }
    }
}
