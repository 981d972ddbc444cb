//! Host boundary: what the session needs from whatever drives it.

use std::fmt;
use std::path::{Path, PathBuf};

/// A yes/no question the dispatcher asks before a destructive step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
    /// Removing `path`; `is_dir` means the whole tree goes.
    Delete { path: PathBuf, is_dir: bool },

    /// A paste would replace `path`.
    Overwrite { path: PathBuf },
}

impl PromptKind {
    pub fn path(&self) -> &Path {
        match self {
            Self::Delete { path, .. } | Self::Overwrite { path } => path,
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete { path, is_dir: true } => {
                write!(f, "Delete folder {} and everything in it?", path.display())
            }
            Self::Delete { path, is_dir: false } => write!(f, "Delete {}?", path.display()),
            Self::Overwrite { path } => write!(f, "Overwrite existing {}?", path.display()),
        }
    }
}

/// Implemented by the UI shell. All three calls block until answered.
pub trait Host {
    /// Hand a file to the desktop. `false` when nothing could open it; the
    /// session treats that as a reportable outcome, not an error.
    fn open_with_default_application(&mut self, path: &Path) -> bool;

    fn confirm(&mut self, prompt: PromptKind) -> bool;

    /// `None` when the user cancelled.
    fn prompt_for_text(&mut self, title: &str, default: &str) -> Option<String>;
}

impl<H: Host + ?Sized> Host for &mut H {
    fn open_with_default_application(&mut self, path: &Path) -> bool {
        (**self).open_with_default_application(path)
    }

    fn confirm(&mut self, prompt: PromptKind) -> bool {
        (**self).confirm(prompt)
    }

    fn prompt_for_text(&mut self, title: &str, default: &str) -> Option<String> {
        (**self).prompt_for_text(title, default)
    }
}
