use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::kind::ArchiveKind;

/// Longest signature we look at.
pub const SIGNATURE_LEN: usize = 8;

pub fn detect_kind(data: &[u8]) -> Option<ArchiveKind> {
    match data {
        [0x50, 0x4B, 0x03, 0x04, ..] | [0x50, 0x4B, 0x05, 0x06, ..] | [0x50, 0x4B, 0x07, 0x08, ..] => {
            Some(ArchiveKind::Zip)
        }
        [b'R', b'a', b'r', b'!', 0x1A, 0x07, 0x00, ..]
        | [b'R', b'a', b'r', b'!', 0x1A, 0x07, 0x01, 0x00, ..] => Some(ArchiveKind::Rar),
        [b'7', b'z', 0xBC, 0xAF, 0x27, 0x1C, ..] => Some(ArchiveKind::SevenZ),
        _ => None,
    }
}

/// Sniff the leading bytes of a file. Short files yield whatever prefix exists.
pub fn detect_from_path(path: &Path) -> io::Result<Option<ArchiveKind>> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(SIGNATURE_LEN);
    file.take(SIGNATURE_LEN as u64).read_to_end(&mut header)?;
    Ok(detect_kind(&header))
}
