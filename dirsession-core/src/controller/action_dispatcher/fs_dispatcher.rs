//! Filesystem actions that need a name or a confirmation from the host.

use std::path::PathBuf;

use tracing::{debug, instrument};

use super::{ActionDispatcher, Outcome};
use crate::controller::traits::{Host, PromptKind};
use crate::error::SessionResult;

const NEW_FOLDER_TITLE: &str = "Enter directory name:";
const NEW_FOLDER_DEFAULT: &str = "New Folder";
const RENAME_TITLE: &str = "Enter new name:";

impl<H: Host + ?Sized> ActionDispatcher<'_, H> {
    #[instrument(level = "debug", skip(self))]
    pub(super) fn handle_create_directory(&mut self, name: Option<String>) -> SessionResult<Outcome> {
        let Some(name) = name.or_else(|| self.host.prompt_for_text(NEW_FOLDER_TITLE, NEW_FOLDER_DEFAULT))
        else {
            debug!("Create directory cancelled at prompt");
            return Ok(Outcome::Cancelled);
        };

        let path: PathBuf = self.session.create_directory(&name)?;

        Ok(Outcome::Created { path })
    }

    #[instrument(level = "debug", skip(self))]
    pub(super) fn handle_rename(
        &mut self,
        index: usize,
        new_name: Option<String>,
    ) -> SessionResult<Outcome> {
        let from: PathBuf = self.session.entry_path(index)?;

        let new_name: Option<String> = match new_name {
            Some(name) => Some(name),
            None => {
                let current: String = self.session.entry(index)?.name.to_string();
                self.host.prompt_for_text(RENAME_TITLE, &current)
            }
        };

        let Some(new_name) = new_name else {
            debug!("Rename cancelled at prompt");
            return Ok(Outcome::Cancelled);
        };

        let to: PathBuf = self.session.rename(index, &new_name)?;

        Ok(Outcome::Renamed { from, to })
    }

    #[instrument(level = "debug", skip(self))]
    pub(super) fn handle_delete(&mut self, index: usize) -> SessionResult<Outcome> {
        let path: PathBuf = self.session.entry_path(index)?;
        let is_dir: bool = self.session.entry(index)?.is_dir();

        if !self.host.confirm(PromptKind::Delete {
            path: path.clone(),
            is_dir,
        }) {
            debug!(path = %path.display(), "Delete declined");
            return Ok(Outcome::Cancelled);
        }

        let removed: u64 = self.session.delete(index)?;

        Ok(Outcome::Deleted { path, removed })
    }
}
