//! Deletion port used by the remover.

use std::io;
use std::path::Path;

/// Capability to recursively delete everything at a path.
///
/// The tree never touches the filesystem itself; every physical removal goes
/// through an implementation of this trait. Errors are passed back to the
/// caller verbatim.
pub trait Deleter {
    /// Remove the file or directory tree at `path`.
    fn remove_all(&self, path: &Path) -> io::Result<()>;
}

impl<F> Deleter for F
where
    F: Fn(&Path) -> io::Result<()>,
{
    fn remove_all(&self, path: &Path) -> io::Result<()> {
        self(path)
    }
}
