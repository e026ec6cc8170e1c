/// Default ceiling on decompressed bytes for one archive: 4 GiB.
pub const DEFAULT_MAX_TOTAL_BYTES: u64 = 4 * 1024 * 1024 * 1024;

/// Default ceiling on entries (files and directories) for one archive.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Limits applied while extracting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub max_total_bytes: Option<u64>,
    pub max_entries: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_total_bytes: Some(DEFAULT_MAX_TOTAL_BYTES),
            max_entries: Some(DEFAULT_MAX_ENTRIES),
        }
    }
}

impl ExtractOptions {
    /// No limits at all.
    pub fn unlimited() -> Self {
        Self {
            max_total_bytes: None,
            max_entries: None,
        }
    }

    pub fn max_total_bytes(mut self, bytes: u64) -> Self {
        self.max_total_bytes = Some(bytes);
        self
    }

    pub fn max_entries(mut self, entries: usize) -> Self {
        self.max_entries = Some(entries);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_options_default() {
        let options = ExtractOptions::default();
        assert_eq!(options.max_total_bytes, Some(DEFAULT_MAX_TOTAL_BYTES));
        assert_eq!(options.max_entries, Some(DEFAULT_MAX_ENTRIES));
    }

    #[test]
    fn extract_options_builder_pattern() {
        let options = ExtractOptions::unlimited().max_total_bytes(1024).max_entries(3);
        assert_eq!(options.max_total_bytes, Some(1024));
        assert_eq!(options.max_entries, Some(3));
    }
}
