//! Classify what a request points at before anything is downloaded.

use thiserror::Error;
use unarchive_archive::ArchiveKind;
use unarchive_fetch::{Fetcher, HttpClient, file_name_from_url, is_http_url, parse_http_url};
use url::Url;

use crate::transport::{Attachment, SourceMessage};

/// Input that is recognizably not something we can unpack.
///
/// The display text is what the user sees.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Rejection {
    #[error("The file is not a ZIP, RAR, or 7Z archive.")]
    UnsupportedExtension { file_name: Option<String> },

    #[error("{}", undetermined_message(.content_type))]
    UndeterminedFileType { content_type: Option<String> },

    #[error("Error checking the file type: {0}")]
    ProbeFailed(String),

    #[error("Please reply to a ZIP, RAR, or 7Z file or URL to unarchive.")]
    NoRecognizedSource,
}

fn undetermined_message(content_type: &Option<String>) -> &'static str {
    match content_type {
        Some(_) => "The URL does not point to a ZIP, RAR, or 7Z file.",
        None => "Unable to determine the file type from the URL.",
    }
}

/// Where the archive bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    Attachment(Attachment),
    Url(Url),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedSource {
    pub kind: ArchiveKind,
    /// Plain file name, safe to join onto a directory.
    pub file_name: String,
    pub origin: Origin,
}

/// Attachments are classified by extension, links by a metadata probe.
pub async fn resolve<C: HttpClient>(
    source: Option<&SourceMessage>,
    fetcher: &Fetcher<C>,
) -> Result<ResolvedSource, Rejection> {
    match source {
        Some(SourceMessage::Attachment(attachment)) => resolve_attachment(attachment),
        Some(SourceMessage::Text(text)) if is_http_url(text) => resolve_url(text.trim(), fetcher).await,
        _ => Err(Rejection::NoRecognizedSource),
    }
}

pub fn resolve_attachment(attachment: &Attachment) -> Result<ResolvedSource, Rejection> {
    let unsupported = || Rejection::UnsupportedExtension {
        file_name: attachment.file_name.clone(),
    };
    let file_name = attachment
        .file_name
        .as_deref()
        .and_then(base_name)
        .ok_or_else(unsupported)?;
    let kind = ArchiveKind::from_file_name(&file_name).ok_or_else(unsupported)?;

    Ok(ResolvedSource {
        kind,
        file_name,
        origin: Origin::Attachment(attachment.clone()),
    })
}

async fn resolve_url<C: HttpClient>(
    text: &str,
    fetcher: &Fetcher<C>,
) -> Result<ResolvedSource, Rejection> {
    let url = parse_http_url(text).map_err(|e| Rejection::ProbeFailed(e.to_string()))?;
    let info = fetcher
        .probe(url.as_str())
        .await
        .map_err(|e| Rejection::ProbeFailed(e.to_string()))?;

    let kind = info
        .content_type
        .as_deref()
        .and_then(ArchiveKind::from_content_type)
        .ok_or(Rejection::UndeterminedFileType {
            content_type: info.content_type.clone(),
        })?;
    let file_name =
        file_name_from_url(&url).unwrap_or_else(|| format!("archive.{}", kind.extension()));

    Ok(ResolvedSource {
        kind,
        file_name,
        origin: Origin::Url(url),
    })
}

/// Last path component, or `None` when nothing usable is left.
fn base_name(name: &str) -> Option<String> {
    let name = name.rsplit(['/', '\\']).next()?.trim();
    match name {
        "" | "." | ".." => None,
        _ if name.contains('\0') => None,
        _ => Some(name.to_string()),
    }
}
