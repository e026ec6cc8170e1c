use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::core::parse_http_url;
use crate::data::{FetchOptions, ResourceInfo};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result};

/// Probes and downloads remote archives.
pub struct Fetcher<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Metadata-only probe of `url`.
    pub async fn probe(&self, url: &str) -> Result<ResourceInfo> {
        let url = parse_http_url(url)?;
        let info = self.client.head(url.as_str()).await?;
        tracing::debug!(%url, content_type = ?info.content_type, length = ?info.content_length, "probed");
        Ok(info)
    }

    /// Stream `url` into `destination`, chunk by chunk.
    ///
    /// An existing file at `destination` is overwritten. On any failure the
    /// partially written file is removed. Returns the number of bytes written.
    pub async fn fetch(&self, url: &str, destination: &Path, options: &FetchOptions) -> Result<u64> {
        let url = parse_http_url(url)?;

        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FetchError::io(parent, e))?;
        }

        let mut stream = self.client.stream(url.as_str()).await?;
        // Declared before the handle so the file is closed before removal.
        let guard = PartialFile::new(destination);
        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| FetchError::io(destination, e))?;

        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            written += chunk.len() as u64;
            if let Some(limit) = options.max_bytes
                && written > limit
            {
                return Err(FetchError::TooLarge { limit });
            }
            file.write_all(&chunk)
                .await
                .map_err(|e| FetchError::io(destination, e))?;
        }
        file.flush().await.map_err(|e| FetchError::io(destination, e))?;
        drop(file);

        guard.keep();
        tracing::debug!(%url, bytes = written, path = %destination.display(), "downloaded");
        Ok(written)
    }
}

/// Removes a half-written download unless [`PartialFile::keep`] is called.
struct PartialFile {
    path: PathBuf,
    keep: bool,
}

impl PartialFile {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            keep: false,
        }
    }

    fn keep(mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFile {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}
