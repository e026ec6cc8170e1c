use std::fmt;

/// The archive formats the bot knows how to unpack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    Zip,
    Rar,
    SevenZ,
}

impl ArchiveKind {
    pub const ALL: [ArchiveKind; 3] = [ArchiveKind::Zip, ArchiveKind::Rar, ArchiveKind::SevenZ];

    /// Classify by file name extension, ignoring ASCII case.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        Self::ALL
            .into_iter()
            .find(|kind| ext.eq_ignore_ascii_case(kind.extension()))
    }

    /// Classify by a declared `Content-Type`. The first of `zip`, `rar`, `7z`
    /// found as a substring wins.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| content_type.contains(kind.extension()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Rar => "rar",
            Self::SevenZ => "7z",
        }
    }

    /// Name of the working directory that receives this kind's output.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Zip => "extracted_files_zip",
            Self::Rar => "extracted_files_rar",
            Self::SevenZ => "extracted_files_7z",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Zip => "ZIP",
            Self::Rar => "RAR",
            Self::SevenZ => "7z",
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
