//! Navigation actions: typed paths, entry activation, parent, refresh.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{ActionDispatcher, Outcome};
use crate::controller::traits::Host;
use crate::error::SessionResult;
use crate::fs::entry_record::DirectoryEntryRecord;

impl<H: Host + ?Sized> ActionDispatcher<'_, H> {
    pub(super) fn handle_navigate(&mut self, path: &Path) -> SessionResult<Outcome> {
        let location: PathBuf = self.session.navigate(path)?.location().to_path_buf();

        Ok(Outcome::Navigated { location })
    }

    /// Directories are entered; files go to the host's default application.
    pub(super) fn handle_activate(&mut self, index: usize) -> SessionResult<Outcome> {
        let record: &DirectoryEntryRecord = self.session.entry(index)?;
        let is_dir: bool = record.is_dir();
        let path: PathBuf = self.session.snapshot().path_of(record);

        if is_dir {
            return self.handle_navigate(&path);
        }

        let launched: bool = self.host.open_with_default_application(&path);
        info!(path = %path.display(), launched, "Open requested");

        Ok(Outcome::Opened { path, launched })
    }

    pub(super) fn handle_go_parent(&mut self) -> SessionResult<Outcome> {
        if !self.session.go_parent()? {
            return Ok(Outcome::AtRoot);
        }

        Ok(Outcome::Navigated {
            location: self.session.location().to_path_buf(),
        })
    }

    pub(super) fn handle_refresh(&mut self) -> SessionResult<Outcome> {
        let entries: usize = self.session.refresh()?.len();

        Ok(Outcome::Refreshed { entries })
    }
}
