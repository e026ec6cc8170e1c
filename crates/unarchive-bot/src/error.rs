//! Error types for unarchive-bot.

use std::error::Error as StdError;

use thiserror::Error;
use unarchive_archive::Error as ArchiveError;
use unarchive_fetch::FetchError;

use crate::resolver::Rejection;
use crate::transport::TransportError;

/// Why a request ended without delivering its files.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("download failed: {0}")]
    Download(#[from] FetchError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Workspace(#[from] unarchive_fs::Error),

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl PipelineError {
    /// The single text the user gets for this failure.
    ///
    /// Local paths stay in the logs; the user only sees the underlying cause.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(rejection) => rejection.to_string(),
            Self::Download(e) => format!("Error downloading the file: {}", cause(e)),
            Self::Archive(ArchiveError::Corrupted(kind)) => {
                format!("The provided {} file is corrupted.", kind.label())
            }
            Self::Archive(e) => format!("An error occurred: {}", cause(e)),
            Self::Transport(e) => format!("An error occurred: {}", cause(e)),
            Self::Workspace(e) => format!("An error occurred: {}", cause(e)),
            Self::Join(e) => format!("An error occurred: {}", cause(e)),
        }
    }

    /// Expected outcomes that do not indicate a fault on our side.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Rejected(_) | Self::Archive(ArchiveError::Corrupted(_))
        )
    }
}

/// The wrapped I/O error when there is one, since the outer message names a path.
fn cause(e: &(dyn StdError + 'static)) -> String {
    match e.source() {
        Some(source) => source.to_string(),
        None => e.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use unarchive_archive::ArchiveKind;

    #[test]
    fn corrupted_archives_name_their_kind() {
        let zip = PipelineError::from(ArchiveError::Corrupted(ArchiveKind::Zip));
        let sevenz = PipelineError::from(ArchiveError::Corrupted(ArchiveKind::SevenZ));
        assert_eq!(zip.user_message(), "The provided ZIP file is corrupted.");
        assert_eq!(sevenz.user_message(), "The provided 7z file is corrupted.");
        assert!(zip.is_rejection());
    }

    #[test]
    fn download_failures_carry_detail() {
        let err = PipelineError::from(FetchError::Status(503));
        assert_eq!(err.user_message(), "Error downloading the file: HTTP status 503");
        assert!(!err.is_rejection());
    }

    #[test]
    fn local_paths_are_not_shown_to_users() {
        let denied = || std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let failures = [
            PipelineError::from(unarchive_fs::Error::Scoped {
                path: "/srv/bot/downloads".into(),
                source: denied(),
            }),
            PipelineError::from(TransportError::io("/srv/bot/extracted_files_zip/request-x/a.txt", denied())),
            PipelineError::from(ArchiveError::ExtractionFailed {
                path: "/srv/bot/extracted_files_zip/request-x/a.txt".into(),
                source: denied(),
            }),
            PipelineError::from(ArchiveError::DirectoryCreationFailed {
                path: "/srv/bot/extracted_files_zip/request-x/sub".into(),
                source: denied(),
            }),
        ];

        for err in failures {
            let message = err.user_message();
            assert_eq!(message, "An error occurred: permission denied");
            assert!(!message.contains("/srv/bot"));
        }

        let download = PipelineError::from(FetchError::Io {
            path: "/srv/bot/downloads/request-x/a.zip".into(),
            source: std::io::Error::other("disk full"),
        });
        assert_eq!(download.user_message(), "Error downloading the file: disk full");
    }

    #[test]
    fn other_failures_are_generic() {
        let err = PipelineError::from(TransportError::Request("chat not found".into()));
        assert_eq!(err.user_message(), "An error occurred: chat not found");
    }
}
