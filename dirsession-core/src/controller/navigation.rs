//! Navigation controller: turn a typed path into a validated location.

use crate::error::{SessionError, SessionResult};
use directories::BaseDirs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, instrument};

/// Resolve `candidate` against `base` into a canonical existing directory.
///
/// A leading `~` component expands to the home directory. Relative paths are
/// joined onto `base`. `.`, `..` and symlinks are resolved by
/// canonicalization. Nothing is changed on failure; every failure is
/// `InvalidPath`.
#[instrument(level = "debug", fields(candidate = %candidate.display(), base = %base.display()))]
pub fn resolve(candidate: &Path, base: &Path) -> SessionResult<PathBuf> {
    if candidate.as_os_str().is_empty() {
        return Err(SessionError::invalid_path(candidate, "empty path"));
    }

    let expanded: PathBuf = expand_home(candidate)?;

    let joined: PathBuf = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };

    let canonical: PathBuf = joined
        .canonicalize()
        .map_err(|e| SessionError::invalid_path(&joined, e.to_string()))?;

    if !canonical.is_dir() {
        return Err(SessionError::invalid_path(canonical, "not a directory"));
    }

    debug!(resolved = %canonical.display(), "Navigation target resolved");
    Ok(canonical)
}

/// Parent of a canonical location; `None` at the filesystem root.
pub fn parent_of(location: &Path) -> Option<&Path> {
    location.parent()
}

fn expand_home(candidate: &Path) -> SessionResult<PathBuf> {
    let mut components = candidate.components();

    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let home: PathBuf = home_dir()
                .ok_or_else(|| SessionError::invalid_path(candidate, "home directory unknown"))?;

            Ok(home.join(components.as_path()))
        }
        _ => Ok(candidate.to_path_buf()),
    }
}

fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}
