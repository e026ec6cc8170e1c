//! Filesystem helpers for per-request working directories.
//!
//! - [`ScopedDir`] - a uniquely named directory removed when its owner is done
//! - [`wipe`] - reset a fixed set of working directories to empty
//! - [`ensure_dir`] / [`remove_file_if_exists`] - idempotent primitives

mod error;
mod workspace;

pub use error::{Error, Result};
pub use workspace::ScopedDir;

use std::io::ErrorKind;
use std::path::Path;

/// Create `path` and all its parents if they do not exist yet.
pub fn ensure_dir(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|e| Error::Create {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Remove a single file. Returns `true` if something was removed.
pub fn remove_file_if_exists(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Remove {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Remove each directory recursively, then recreate it empty.
///
/// Missing directories are not an error. Every directory exists and is empty
/// once this returns `Ok`.
pub fn wipe<I, P>(dirs: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for dir in dirs {
        let dir = dir.as_ref();
        match std::fs::remove_dir_all(dir) {
            Ok(()) => tracing::debug!(path = %dir.display(), "wiped directory"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::Remove {
                    path: dir.to_path_buf(),
                    source: e,
                });
            }
        }
        ensure_dir(dir)?;
    }
    Ok(())
}
