use std::time::Duration;

/// What a metadata-only probe learned about a remote resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceInfo {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

impl ResourceInfo {
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }
}

/// Network timeouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    /// TCP/TLS connection establishment.
    pub connect: Duration,
    /// Whole metadata probe.
    pub probe: Duration,
    /// Whole download, body included.
    pub download: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            probe: Duration::from_secs(30),
            download: Duration::from_secs(600),
        }
    }
}

/// Per-download options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Abort once the body grows past this many bytes.
    pub max_bytes: Option<u64>,
}

impl FetchOptions {
    pub fn max_bytes(mut self, bytes: u64) -> Self {
        self.max_bytes = Some(bytes);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_info_builder() {
        let info = ResourceInfo::default()
            .with_content_type("application/zip")
            .with_content_length(42);
        assert_eq!(info.content_type.as_deref(), Some("application/zip"));
        assert_eq!(info.content_length, Some(42));
    }

    #[test]
    fn timeouts_default() {
        let t = Timeouts::default();
        assert!(t.connect < t.probe);
        assert!(t.probe < t.download);
    }

    #[test]
    fn fetch_options_default_is_unbounded() {
        assert_eq!(FetchOptions::default().max_bytes, None);
        assert_eq!(FetchOptions::default().max_bytes(10).max_bytes, Some(10));
    }
}
