use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::extract::{EntryHeader, EntryKind, EntrySink, EntrySource};
use crate::kind::ArchiveKind;

/// RAR archives are decoded by the bundled unrar library, which works on paths
/// and hands out each entry as an owned buffer.
pub struct RarSource {
    path: PathBuf,
}

impl RarSource {
    /// Open the archive listing once to make sure the body parses.
    pub fn open(path: &Path) -> Result<Self> {
        let listing = unrar::Archive::new(path)
            .open_for_listing()
            .map_err(|_| corrupted())?;
        for header in listing {
            header.map_err(|_| corrupted())?;
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }
}

impl EntrySource for RarSource {
    fn kind(&self) -> ArchiveKind {
        ArchiveKind::Rar
    }

    fn for_each_entry(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        let mut archive = unrar::Archive::new(&self.path)
            .open_for_processing()
            .map_err(|_| corrupted())?;

        while let Some(cursor) = archive.read_header().map_err(|_| corrupted())? {
            let entry = cursor.entry();
            let header = EntryHeader {
                name: entry.filename.to_string_lossy().into_owned(),
                size: entry.unpacked_size as u64,
                kind: if entry.is_directory() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
            };

            sink.admit(&header)?;
            archive = match header.kind {
                EntryKind::File => {
                    let (data, next) = cursor.read().map_err(|_| corrupted())?;
                    sink.write(&header, &mut Cursor::new(data))?;
                    next
                }
                _ => {
                    sink.write(&header, &mut io::empty())?;
                    cursor.skip().map_err(|_| corrupted())?
                }
            };
        }
        Ok(())
    }
}

fn corrupted() -> Error {
    Error::Corrupted(ArchiveKind::Rar)
}
