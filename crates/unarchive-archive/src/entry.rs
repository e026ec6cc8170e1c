use std::path::{Component, Path, PathBuf};

use crate::kind::ArchiveKind;

/// A file written to disk by the extractor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedEntry {
    /// `relative_path` resolved under the destination directory.
    pub absolute_path: PathBuf,
    /// Path as recorded inside the archive, normalized.
    pub relative_path: PathBuf,
    pub size: u64,
}

impl ExtractedEntry {
    pub fn file_name(&self) -> String {
        self.relative_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The containing directory inside the archive, `/`-separated, empty at the root.
    pub fn directory(&self) -> String {
        self.relative_path
            .parent()
            .map(join_with_slash)
            .unwrap_or_default()
    }
}

fn join_with_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Everything one extraction produced, in archive order.
#[derive(Clone, Debug)]
pub struct ExtractionReport {
    pub kind: ArchiveKind,
    pub entries: Vec<ExtractedEntry>,
    pub total_bytes: u64,
}

impl ExtractionReport {
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(relative: &str) -> ExtractedEntry {
        let relative_path: PathBuf = relative.split('/').collect();
        ExtractedEntry {
            absolute_path: Path::new("/srv/out").join(&relative_path),
            relative_path,
            size: 1,
        }
    }

    #[test]
    fn root_entry_has_empty_directory() {
        let e = entry("a.txt");
        assert_eq!(e.file_name(), "a.txt");
        assert_eq!(e.directory(), "");
    }

    #[test]
    fn nested_entry_directory_uses_forward_slashes() {
        let e = entry("docs/2024/report.pdf");
        assert_eq!(e.file_name(), "report.pdf");
        assert_eq!(e.directory(), "docs/2024");
    }
}
