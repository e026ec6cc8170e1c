use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use crate::error::{Error, Result};
use crate::extract::{EntryHeader, EntryKind, EntrySink, EntrySource};
use crate::kind::ArchiveKind;

const S_IFMT: u32 = 0o170000;
const S_IFLNK: u32 = 0o120000;

pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
}

impl ZipSource<File> {
    pub fn open(path: &Path) -> Result<Self> {
        Self::new(File::open(path)?)
    }
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader).map_err(|_| Error::Corrupted(ArchiveKind::Zip))?;
        Ok(Self { archive })
    }
}

impl<R: Read + Seek> EntrySource for ZipSource<R> {
    fn kind(&self) -> ArchiveKind {
        ArchiveKind::Zip
    }

    fn for_each_entry(&mut self, sink: &mut dyn EntrySink) -> Result<()> {
        for index in 0..self.archive.len() {
            let mut file = self
                .archive
                .by_index(index)
                .map_err(|_| Error::Corrupted(ArchiveKind::Zip))?;

            let kind = if file.is_dir() {
                EntryKind::Directory
            } else if file.unix_mode().is_some_and(|mode| mode & S_IFMT == S_IFLNK) {
                EntryKind::Symlink
            } else {
                EntryKind::File
            };

            let header = EntryHeader {
                name: file.name().to_string(),
                size: file.size(),
                kind,
            };

            sink.admit(&header)?;
            sink.write(&header, &mut file)?;
        }
        Ok(())
    }
}
