use std::fs::File;
use std::path::Path;

use sevenz_rust::{Password, SevenZReader};

use crate::error::{Error, Result};
use crate::extract::{EntryHeader, EntryKind, EntrySink, EntrySource};
use crate::kind::ArchiveKind;

pub struct SevenZSource {
    reader: SevenZReader<File>,
}

impl SevenZSource {
    pub fn open(path: &Path) -> Result<Self> {
        let reader = SevenZReader::open(path, Password::empty()).map_err(|_| corrupted())?;
        Ok(Self { reader })
    }
}

impl EntrySource for SevenZSource {
    fn kind(&self) -> ArchiveKind {
        ArchiveKind::SevenZ
    }

    fn for_each_entry(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        // The decoder drives the walk; sink failures are parked here and the
        // walk is stopped by returning `false`.
        let mut failure: Option<Error> = None;

        let walked = self.reader.for_each_entries(|entry, data| {
            let header = EntryHeader {
                name: entry.name().to_string(),
                size: entry.size(),
                kind: if entry.is_directory() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                },
            };

            let step = sink.admit(&header).and_then(|()| sink.write(&header, data));
            match step {
                Ok(()) => Ok(true),
                Err(e) => {
                    failure = Some(e);
                    Ok(false)
                }
            }
        });

        if let Some(e) = failure {
            return Err(e);
        }
        walked.map_err(|_| corrupted())
    }
}

fn corrupted() -> Error {
    Error::Corrupted(ArchiveKind::SevenZ)
}
