//! One request from acknowledgment to cleanup.

use std::path::Path;

use unarchive_archive::{ArchiveKind, ExtractOptions, ExtractionReport};
use unarchive_fetch::{FetchOptions, Fetcher, HttpClient};
use unarchive_fs::ScopedDir;

use crate::error::{PipelineError, Result};
use crate::layout::WorkingDirs;
use crate::resolver::{self, Origin, ResolvedSource};
use crate::transport::{Conversation, RequestContext, Transport};

pub const RECEIVED: &str = "File received. Extracting...";
pub const COMPLETE: &str = "Extraction complete.";

const SCOPE_PREFIX: &str = "request-";

/// What a finished request delivered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Delivery {
    pub kind: ArchiveKind,
    pub file_name: String,
    pub delivered: usize,
    pub total_bytes: u64,
}

/// Resolves, downloads, extracts and delivers archives.
///
/// Every request stages its archive and its output in fresh directories
/// under the shared working directories, so requests never see each other's
/// files. Both are removed when the request ends, however it ends.
pub struct Pipeline<T: Transport, C: HttpClient> {
    transport: T,
    fetcher: Fetcher<C>,
    dirs: WorkingDirs,
    fetch_options: FetchOptions,
    extract_options: ExtractOptions,
}

impl<T: Transport, C: HttpClient> Pipeline<T, C> {
    pub fn new(transport: T, fetcher: Fetcher<C>, dirs: WorkingDirs) -> Self {
        Self {
            transport,
            fetcher,
            dirs,
            fetch_options: FetchOptions::default(),
            extract_options: ExtractOptions::default(),
        }
    }

    pub fn with_fetch_options(mut self, options: FetchOptions) -> Self {
        self.fetch_options = options;
        self
    }

    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract_options = options;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn fetcher(&self) -> &Fetcher<C> {
        &self.fetcher
    }

    pub fn dirs(&self) -> &WorkingDirs {
        &self.dirs
    }

    /// Run a request and report any failure to the user as one text message.
    pub async fn run(&self, ctx: &RequestContext) -> Option<Delivery> {
        match self.try_run(ctx).await {
            Ok(delivery) => Some(delivery),
            Err(err) => {
                if err.is_rejection() {
                    tracing::warn!(chat = ctx.conversation.chat_id, error = %err, "request rejected");
                } else {
                    tracing::error!(chat = ctx.conversation.chat_id, error = %err, "request failed");
                }
                self.reply(&ctx.conversation, &err.user_message()).await;
                None
            }
        }
    }

    pub async fn try_run(&self, ctx: &RequestContext) -> Result<Delivery> {
        let conversation = &ctx.conversation;
        self.transport.reply_text(conversation, RECEIVED).await?;

        let resolved = resolver::resolve(ctx.source.as_ref(), &self.fetcher).await?;
        tracing::info!(
            chat = conversation.chat_id,
            kind = %resolved.kind,
            file = %resolved.file_name,
            "request started"
        );

        let staging = ScopedDir::new_in(self.dirs.downloads(), SCOPE_PREFIX)?;
        let output = match ScopedDir::new_in(self.dirs.for_kind(resolved.kind), SCOPE_PREFIX) {
            Ok(output) => output,
            Err(e) => {
                release(staging);
                return Err(e.into());
            }
        };

        let result = self.deliver(conversation, &resolved, &staging, &output).await;
        release(output);
        release(staging);

        if let Ok(delivery) = &result {
            tracing::info!(
                chat = conversation.chat_id,
                kind = %delivery.kind,
                files = delivery.delivered,
                bytes = delivery.total_bytes,
                "request finished"
            );
        }
        result
    }

    /// Wipe every working directory, including those of running requests.
    pub fn clean(&self) -> Result<()> {
        self.dirs.wipe()?;
        tracing::info!(root = %self.dirs.root().display(), "working directories wiped");
        Ok(())
    }

    async fn deliver(
        &self,
        conversation: &Conversation,
        resolved: &ResolvedSource,
        staging: &ScopedDir,
        output: &ScopedDir,
    ) -> Result<Delivery> {
        let archive_path = staging.join(&resolved.file_name);
        match &resolved.origin {
            Origin::Attachment(attachment) => {
                let size = self
                    .transport
                    .download_attachment(attachment, &archive_path)
                    .await?;
                tracing::debug!(bytes = size, path = %archive_path.display(), "attachment downloaded");
            }
            Origin::Url(url) => {
                let notice = format!("Downloading {}...", resolved.file_name);
                self.transport.reply_text(conversation, &notice).await?;
                self.fetcher
                    .fetch(url.as_str(), &archive_path, &self.fetch_options)
                    .await?;
            }
        }

        let report = self
            .extract(&archive_path, resolved.kind, output.path())
            .await?;

        for entry in &report.entries {
            let caption = entry.directory();
            self.transport
                .send_document(conversation, &entry.absolute_path, &entry.file_name(), &caption)
                .await?;
            tracing::debug!(entry = %entry.relative_path.display(), "entry delivered");
        }
        self.transport.reply_text(conversation, COMPLETE).await?;

        Ok(Delivery {
            kind: report.kind,
            file_name: resolved.file_name.clone(),
            delivered: report.entry_count(),
            total_bytes: report.total_bytes,
        })
    }

    /// Extraction is blocking work; it runs off the async workers.
    async fn extract(
        &self,
        archive_path: &Path,
        kind: ArchiveKind,
        destination: &Path,
    ) -> Result<ExtractionReport> {
        let source = archive_path.to_path_buf();
        let target = destination.to_path_buf();
        let options = self.extract_options.clone();
        let extracted =
            tokio::task::spawn_blocking(move || unarchive_archive::extract(&source, kind, &target, &options))
                .await?;

        extracted.map_err(|e| {
            if e.is_corrupted() {
                match unarchive_fs::remove_file_if_exists(archive_path) {
                    Ok(_) => tracing::debug!(path = %archive_path.display(), "removed corrupted archive"),
                    Err(rm) => tracing::warn!(error = %rm, "failed to remove corrupted archive"),
                }
            }
            PipelineError::from(e)
        })
    }

    /// Send a text, logging instead of failing.
    pub async fn reply(&self, conversation: &Conversation, text: &str) {
        if let Err(e) = self.transport.reply_text(conversation, text).await {
            tracing::warn!(chat = conversation.chat_id, error = %e, "failed to send reply");
        }
    }
}

fn release(scope: ScopedDir) {
    let path = scope.path().to_path_buf();
    if let Err(e) = scope.close() {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove request directory");
    }
}
