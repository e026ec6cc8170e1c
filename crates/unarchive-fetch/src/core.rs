//! Pure helpers over URLs.

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{FetchError, Result};

/// Whether `text` looks like an `http://` or `https://` link.
pub fn is_http_url(text: &str) -> bool {
    let text = text.trim_start();
    ["http://", "https://"].iter().any(|scheme| {
        text.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Parse and check that the scheme is HTTP(S).
pub fn parse_http_url(text: &str) -> Result<Url> {
    let url = Url::parse(text.trim()).map_err(|e| FetchError::InvalidUrl(format!("{text}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::InvalidUrl(format!("unsupported scheme '{other}'"))),
    }
}

/// Last non-empty path segment, percent-decoded.
///
/// Anything that could act as a separator after decoding is cut away, and
/// `.`/`..` yield `None`.
pub fn file_name_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.filter(|s| !s.is_empty()).next_back()?;
    let decoded = percent_decode_str(segment).decode_utf8_lossy();
    let name = decoded.rsplit(['/', '\\']).next().unwrap_or_default().trim();

    match name {
        "" | "." | ".." => None,
        _ if name.contains('\0') => None,
        _ => Some(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn recognizes_http_urls() {
        assert!(is_http_url("http://example.com/a.zip"));
        assert!(is_http_url("https://example.com/a.zip"));
        assert!(is_http_url("  HTTPS://example.com/a.zip"));
        assert!(!is_http_url("ftp://example.com/a.zip"));
        assert!(!is_http_url("see https://example.com"));
        assert!(!is_http_url("http:/"));
    }

    #[test]
    fn parse_rejects_non_http() {
        assert!(parse_http_url("https://example.com/x.7z").is_ok());
        assert!(matches!(parse_http_url("ftp://example.com/x"), Err(FetchError::InvalidUrl(_))));
        assert!(matches!(parse_http_url("https://"), Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn file_name_from_last_segment() {
        assert_eq!(
            file_name_from_url(&url("https://example.com/files/photos.zip")).as_deref(),
            Some("photos.zip")
        );
        assert_eq!(
            file_name_from_url(&url("https://example.com/files/photos.zip?token=abc#frag")).as_deref(),
            Some("photos.zip")
        );
        assert_eq!(
            file_name_from_url(&url("https://example.com/dir/")).as_deref(),
            Some("dir")
        );
    }

    #[test]
    fn file_name_is_percent_decoded() {
        assert_eq!(
            file_name_from_url(&url("https://example.com/my%20files.rar")).as_deref(),
            Some("my files.rar")
        );
    }

    #[test]
    fn file_name_cannot_smuggle_separators() {
        assert_eq!(
            file_name_from_url(&url("https://example.com/..%2F..%2Fetc%2Fpasswd")).as_deref(),
            Some("passwd")
        );
        assert_eq!(file_name_from_url(&url("https://example.com/%2E%2E")), None);
    }

    #[test]
    fn file_name_missing() {
        assert_eq!(file_name_from_url(&url("https://example.com")), None);
        assert_eq!(file_name_from_url(&url("https://example.com/")), None);
    }
}
