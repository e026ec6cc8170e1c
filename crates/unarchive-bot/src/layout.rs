use std::path::{Path, PathBuf};

use unarchive_archive::ArchiveKind;

/// Staging area for downloaded archives.
pub const DOWNLOADS_DIR: &str = "downloads";

/// The fixed working directories under one root.
///
/// Requests never write into these directly; each one works inside a
/// uniquely named child, see [`unarchive_fs::ScopedDir`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkingDirs {
    root: PathBuf,
    downloads: PathBuf,
}

impl WorkingDirs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let downloads = root.join(DOWNLOADS_DIR);
        Self { root, downloads }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn downloads(&self) -> &Path {
        &self.downloads
    }

    pub fn for_kind(&self, kind: ArchiveKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Staging first, then one directory per kind.
    pub fn all(&self) -> Vec<PathBuf> {
        std::iter::once(self.downloads.clone())
            .chain(ArchiveKind::ALL.into_iter().map(|kind| self.for_kind(kind)))
            .collect()
    }

    pub fn ensure(&self) -> unarchive_fs::Result<()> {
        self.all().iter().try_for_each(unarchive_fs::ensure_dir)
    }

    /// Empty every working directory.
    pub fn wipe(&self) -> unarchive_fs::Result<()> {
        unarchive_fs::wipe(self.all())
    }
}
