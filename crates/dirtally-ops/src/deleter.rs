//! Concrete deletion backends.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dirtally_core::Deleter;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How removed entries leave the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMethod {
    /// Remove permanently.
    #[default]
    Permanent,
    /// Move to the platform trash.
    Trash,
}

impl std::fmt::Display for DeleteMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permanent => write!(f, "Delete permanently"),
            Self::Trash => write!(f, "Move to trash"),
        }
    }
}

/// Build the backend for a delete method.
pub fn deleter_for(method: DeleteMethod) -> Box<dyn Deleter + Send + Sync> {
    match method {
        DeleteMethod::Permanent => Box::new(FsDeleter),
        DeleteMethod::Trash => Box::new(TrashDeleter),
    }
}

/// Permanently removes files and directory trees.
///
/// A path that no longer exists counts as removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDeleter;

impl Deleter for FsDeleter {
    fn remove_all(&self, path: &Path) -> io::Result<()> {
        let result = match fs::symlink_metadata(path) {
            Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
            Ok(_) => fs::remove_file(path),
            Err(e) => Err(e),
        };
        match result {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Already gone");
                Ok(())
            }
            other => other,
        }
    }
}

/// Moves files and directories to the platform trash.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrashDeleter;

impl Deleter for TrashDeleter {
    fn remove_all(&self, path: &Path) -> io::Result<()> {
        if fs::symlink_metadata(path).is_err_and(|e| e.kind() == io::ErrorKind::NotFound) {
            return Ok(());
        }
        trash::delete(path).map_err(trash_error)
    }
}

/// Wrap a trash failure so the original error stays reachable as the source.
fn trash_error(err: trash::Error) -> io::Error {
    io::Error::other(err)
}

/// Deletes nothing and remembers what it was asked to delete.
#[derive(Debug, Default)]
pub struct DryRunDeleter {
    requested: Mutex<Vec<PathBuf>>,
}

impl DryRunDeleter {
    /// Create an empty dry-run backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths requested so far, in order.
    pub fn requested(&self) -> Vec<PathBuf> {
        self.requested
            .lock()
            .map(|paths| paths.clone())
            .unwrap_or_default()
    }
}

impl Deleter for DryRunDeleter {
    fn remove_all(&self, path: &Path) -> io::Result<()> {
        debug!(path = %path.display(), "Dry run, skipping deletion");
        self.requested
            .lock()
            .map_err(|_| io::Error::other("dry-run log poisoned"))?
            .push(path.to_path_buf());
        Ok(())
    }
}
