use std::io;
use std::path::PathBuf;

use crate::kind::ArchiveKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the provided {0} file is corrupted")]
    Corrupted(ArchiveKind),

    #[error("{0} archives are not supported by this build")]
    UnsupportedKind(ArchiveKind),

    #[error("entry '{entry}' escapes the extraction directory")]
    UnsafePath { entry: String },

    #[error("archive expands beyond the {limit} byte limit")]
    LimitExceeded { limit: u64 },

    #[error("archive holds more than {limit} entries")]
    TooManyEntries { limit: usize },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether the archive body itself is at fault, as opposed to the local disk.
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
