use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{Error, Result, ensure_dir};

/// A uniquely named directory owned by one request.
///
/// The directory is removed when the value is dropped. Call [`ScopedDir::close`]
/// to observe removal failures instead of swallowing them.
#[derive(Debug)]
pub struct ScopedDir {
    inner: TempDir,
}

impl ScopedDir {
    /// Allocate a fresh child of `parent`, creating `parent` first if needed.
    pub fn new_in(parent: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let parent = parent.as_ref();
        ensure_dir(parent)?;

        let inner = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(parent)
            .map_err(|e| Error::Scoped {
                path: parent.to_path_buf(),
                source: e,
            })?;

        tracing::trace!(path = %inner.path().display(), "allocated scoped directory");

        Ok(Self { inner })
    }

    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.inner.path().join(name)
    }

    /// Remove the directory now and report whether that worked.
    pub fn close(self) -> Result<()> {
        let path = self.inner.path().to_path_buf();
        self.inner.close().map_err(|e| Error::Remove { path, source: e })
    }
}
