//! Hand files to an external program.

use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Launcher {
    /// Program followed by its leading arguments; the file path is appended.
    command: Option<Vec<String>>,
}

impl Launcher {
    /// `opener_cmd` is split on whitespace (`"code -n"`). `None` or a blank
    /// string selects the platform default.
    pub fn new(opener_cmd: Option<&str>) -> Self {
        let command: Option<Vec<String>> = opener_cmd
            .map(|cmd| cmd.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|parts| !parts.is_empty());

        Self { command }
    }

    pub fn command_for(&self, path: &Path) -> Command {
        let mut command: Command = match &self.command {
            Some(parts) => {
                let mut command = Command::new(&parts[0]);
                command.args(&parts[1..]);
                command
            }
            None => platform_default(),
        };

        command.arg(path);
        command
    }

    /// Spawn the opener without waiting for it. `false` when it could not be
    /// started at all.
    pub fn open(&self, path: &Path) -> bool {
        let spawned = self
            .command_for(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(mut child) => {
                debug!(path = %path.display(), pid = child.id(), "Opener started");
                // Reap in the background so the child does not linger as a zombie.
                std::thread::spawn(move || child.wait());
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "No application could be started");
                false
            }
        }
    }
}

#[cfg(target_os = "macos")]
fn platform_default() -> Command {
    Command::new("open")
}

#[cfg(windows)]
fn platform_default() -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", ""]);
    command
}

#[cfg(not(any(target_os = "macos", windows)))]
fn platform_default() -> Command {
    Command::new("xdg-open")
}
