use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create directory '{path}': {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove '{path}': {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to allocate scoped directory in '{path}': {source}")]
    Scoped {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Create { path, .. } | Self::Remove { path, .. } | Self::Scoped { path, .. } => {
                path
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
