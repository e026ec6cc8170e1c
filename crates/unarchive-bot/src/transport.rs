//! The chat-side collaborator of a request.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Where replies for one request go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversation {
    pub chat_id: i64,
    /// Message the replies should quote, if any.
    pub reply_to: Option<i32>,
}

impl Conversation {
    pub fn new(chat_id: i64) -> Self {
        Self {
            chat_id,
            reply_to: None,
        }
    }

    pub fn replying_to(mut self, message_id: i32) -> Self {
        self.reply_to = Some(message_id);
        self
    }
}

/// A file attached to a message, not downloaded yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: Option<String>,
    /// Transport specific id used to download the file.
    pub handle: String,
    pub size: Option<u64>,
}

/// The message a request points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceMessage {
    Attachment(Attachment),
    Text(String),
}

/// Everything the delivery pipeline needs to know about one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    pub conversation: Conversation,
    pub source: Option<SourceMessage>,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(String),

    #[error("file I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TransportError {
    pub fn request(err: impl std::fmt::Display) -> Self {
        Self::Request(err.to_string())
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Messaging operations used by the pipeline.
///
/// # Implementations
///
/// - [`TelegramTransport`](crate::telegram::TelegramTransport): Bot API over `teloxide`
/// - Recording transports in tests
pub trait Transport: Send + Sync {
    fn reply_text(
        &self,
        conversation: &Conversation,
        text: &str,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Send the local file at `path` as a document named `file_name`.
    /// An empty caption is sent as no caption.
    fn send_document(
        &self,
        conversation: &Conversation,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Download `attachment` to `destination` and return its size in bytes.
    fn download_attachment(
        &self,
        attachment: &Attachment,
        destination: &Path,
    ) -> impl Future<Output = Result<u64, TransportError>> + Send;
}
