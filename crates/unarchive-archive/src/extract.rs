//! Extraction pipeline shared by every archive format.
//!
//! Each format provides an [`EntrySource`] that walks its entries in native
//! order and pushes them into an [`EntrySink`]. The sink used here sanitizes
//! names, enforces [`ExtractOptions`] and writes regular files under the
//! destination directory.

use std::io::{self, Read};
use std::path::Path;

use crate::detect;
use crate::entry::{ExtractedEntry, ExtractionReport};
use crate::error::{Error, Result};
use crate::kind::ArchiveKind;
use crate::options::ExtractOptions;
use crate::sanitize::sanitize_entry_path;

#[cfg(feature = "rar")]
mod rar;
#[cfg(feature = "sevenz")]
mod sevenz;
#[cfg(feature = "zip")]
mod zip;

#[cfg(feature = "rar")]
pub use rar::RarSource;
#[cfg(feature = "sevenz")]
pub use sevenz::SevenZSource;
#[cfg(feature = "zip")]
pub use zip::ZipSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

/// Metadata of an entry about to be decoded.
#[derive(Clone, Debug)]
pub struct EntryHeader {
    /// Name exactly as recorded in the archive.
    pub name: String,
    /// Declared decompressed size.
    pub size: u64,
    pub kind: EntryKind,
}

/// Receives entries from an [`EntrySource`].
pub trait EntrySink {
    /// Called before the entry's data is decoded.
    fn admit(&mut self, header: &EntryHeader) -> Result<()>;

    /// Called with the decoded data of an admitted entry.
    fn write(&mut self, header: &EntryHeader, data: &mut dyn Read) -> Result<()>;
}

/// Archive-specific entry walker.
pub trait EntrySource {
    fn kind(&self) -> ArchiveKind;

    /// Visit every entry in the archive's own order.
    fn for_each_entry(&mut self, sink: &mut dyn EntrySink) -> Result<()>;
}

/// Unpack `source_path` as an archive of `kind` into `destination`.
///
/// The archive is opened and validated before `destination` is touched, so a
/// corrupt body never leaves an output directory behind. If this call creates
/// `destination` and then fails, it removes it again.
pub fn extract(
    source_path: impl AsRef<Path>,
    kind: ArchiveKind,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    let source_path = source_path.as_ref();
    let destination = destination.as_ref();

    if detect::detect_from_path(source_path)? != Some(kind) {
        tracing::debug!(path = %source_path.display(), %kind, "signature mismatch");
        return Err(Error::Corrupted(kind));
    }

    match kind {
        #[cfg(feature = "zip")]
        ArchiveKind::Zip => extract_with_source(&mut ZipSource::open(source_path)?, destination, options),
        #[cfg(feature = "rar")]
        ArchiveKind::Rar => extract_with_source(&mut RarSource::open(source_path)?, destination, options),
        #[cfg(feature = "sevenz")]
        ArchiveKind::SevenZ => {
            extract_with_source(&mut SevenZSource::open(source_path)?, destination, options)
        }
        #[allow(unreachable_patterns)]
        other => Err(Error::UnsupportedKind(other)),
    }
}

/// Extract from an already opened source.
pub fn extract_with_source<S: EntrySource + ?Sized>(
    source: &mut S,
    destination: &Path,
    options: &ExtractOptions,
) -> Result<ExtractionReport> {
    let created = !destination.exists();
    std::fs::create_dir_all(destination).map_err(|e| Error::DirectoryCreationFailed {
        path: destination.to_path_buf(),
        source: e,
    })?;

    let mut writer = Writer::new(source.kind(), destination, options);
    let result = source.for_each_entry(&mut writer);

    match result {
        Ok(()) => {
            tracing::debug!(
                kind = %writer.kind,
                entries = writer.entries.len(),
                bytes = writer.total_bytes,
                "archive extracted"
            );
            Ok(writer.into_report())
        }
        Err(e) => {
            if created {
                let _ = std::fs::remove_dir_all(destination);
            }
            Err(e)
        }
    }
}

struct Writer<'a> {
    kind: ArchiveKind,
    destination: &'a Path,
    options: &'a ExtractOptions,
    entries: Vec<ExtractedEntry>,
    total_bytes: u64,
    seen: usize,
}

impl<'a> Writer<'a> {
    fn new(kind: ArchiveKind, destination: &'a Path, options: &'a ExtractOptions) -> Self {
        Self {
            kind,
            destination,
            options,
            entries: Vec::new(),
            total_bytes: 0,
            seen: 0,
        }
    }

    fn remaining_bytes(&self) -> Option<u64> {
        self.options
            .max_total_bytes
            .map(|limit| limit.saturating_sub(self.total_bytes))
    }

    fn into_report(self) -> ExtractionReport {
        ExtractionReport {
            kind: self.kind,
            entries: self.entries,
            total_bytes: self.total_bytes,
        }
    }

    fn write_file(&mut self, header: &EntryHeader, data: &mut dyn Read) -> Result<()> {
        let sanitized = sanitize_entry_path(&header.name, self.destination)?;
        if sanitized.relative.as_os_str().is_empty() {
            return Err(Error::UnsafePath {
                entry: header.name.clone(),
            });
        }
        let target = sanitized.resolved;

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = std::fs::File::create(&target).map_err(|e| Error::ExtractionFailed {
            path: target.clone(),
            source: e,
        })?;

        let limit = self.remaining_bytes();
        let mut decoded = DecodedReader::new(data);
        let copied = match limit {
            Some(remaining) => io::copy(&mut (&mut decoded).take(remaining.saturating_add(1)), &mut file),
            None => io::copy(&mut decoded, &mut file),
        };
        let written = copied.map_err(|e| self.copy_error(&target, e, decoded.failed))?;
        if let Some(remaining) = limit
            && written > remaining
        {
            return Err(Error::LimitExceeded {
                limit: self.options.max_total_bytes.unwrap_or_default(),
            });
        }

        self.total_bytes += written;
        self.entries.push(ExtractedEntry {
            absolute_path: target,
            relative_path: sanitized.relative,
            size: written,
        });
        Ok(())
    }

    /// Anything the decoder raised means the archive body is bad, whatever the
    /// error kind. Only failures on the output side name the target file.
    fn copy_error(&self, target: &Path, e: io::Error, from_decoder: bool) -> Error {
        if from_decoder {
            tracing::debug!(kind = %self.kind, error = %e, "decoder failed mid-entry");
            return Error::Corrupted(self.kind);
        }
        Error::ExtractionFailed {
            path: target.to_path_buf(),
            source: e,
        }
    }
}

/// Remembers whether a read failed, so the two ends of a copy can be told apart.
struct DecodedReader<'r> {
    inner: &'r mut dyn Read,
    failed: bool,
}

impl<'r> DecodedReader<'r> {
    fn new(inner: &'r mut dyn Read) -> Self {
        Self { inner, failed: false }
    }
}

impl Read for DecodedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.inner.read(buf);
        if let Err(e) = &read
            && e.kind() != io::ErrorKind::Interrupted
        {
            self.failed = true;
        }
        read
    }
}

impl EntrySink for Writer<'_> {
    fn admit(&mut self, header: &EntryHeader) -> Result<()> {
        self.seen += 1;
        if let Some(limit) = self.options.max_entries
            && self.seen > limit
        {
            return Err(Error::TooManyEntries { limit });
        }

        if header.kind == EntryKind::File
            && let Some(remaining) = self.remaining_bytes()
            && header.size > remaining
        {
            return Err(Error::LimitExceeded {
                limit: self.options.max_total_bytes.unwrap_or_default(),
            });
        }

        // Reject unsafe names before anything is decoded.
        sanitize_entry_path(&header.name, self.destination)?;
        Ok(())
    }

    fn write(&mut self, header: &EntryHeader, data: &mut dyn Read) -> Result<()> {
        match header.kind {
            EntryKind::File => self.write_file(header, data),
            EntryKind::Directory => {
                let sanitized = sanitize_entry_path(&header.name, self.destination)?;
                std::fs::create_dir_all(&sanitized.resolved).map_err(|e| {
                    Error::DirectoryCreationFailed {
                        path: sanitized.resolved.clone(),
                        source: e,
                    }
                })
            }
            EntryKind::Symlink => {
                tracing::warn!(entry = %header.name, "skipping symlink entry");
                Ok(())
            }
        }
    }
}
