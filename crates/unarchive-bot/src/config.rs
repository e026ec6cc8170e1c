use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use unarchive_archive::ExtractOptions;
use unarchive_fetch::{FetchOptions, Timeouts};

/// Runtime settings, read from flags or the environment.
#[derive(Clone, Parser)]
#[command(name = "unarchive-bot", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct Config {
    /// Bot API token.
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    pub bot_token: String,

    /// Application id for transports that authenticate as a client.
    #[arg(long, env = "API_ID")]
    pub api_id: Option<i32>,

    /// Application secret paired with `--api-id`.
    #[arg(long, env = "API_HASH", hide_env_values = true)]
    pub api_hash: Option<String>,

    /// Directory holding `downloads/` and the `extracted_files_*` directories.
    #[arg(long, env = "UNARCHIVE_WORK_DIR", default_value = ".")]
    pub work_dir: PathBuf,

    /// Seconds allowed for the metadata probe of a link.
    #[arg(long, env = "UNARCHIVE_PROBE_TIMEOUT_SECS", default_value_t = 30)]
    pub probe_timeout_secs: u64,

    /// Seconds allowed for downloading a linked archive.
    #[arg(long, env = "UNARCHIVE_DOWNLOAD_TIMEOUT_SECS", default_value_t = 600)]
    pub download_timeout_secs: u64,

    /// Largest archive accepted from a link, in bytes.
    #[arg(long, env = "UNARCHIVE_MAX_DOWNLOAD_BYTES")]
    pub max_download_bytes: Option<u64>,

    /// Largest decompressed size of one archive, in bytes.
    #[arg(long, env = "UNARCHIVE_MAX_EXTRACT_BYTES")]
    pub max_extract_bytes: Option<u64>,

    /// Most entries accepted in one archive.
    #[arg(long, env = "UNARCHIVE_MAX_ENTRIES")]
    pub max_entries: Option<usize>,
}

impl Config {
    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            probe: Duration::from_secs(self.probe_timeout_secs),
            download: Duration::from_secs(self.download_timeout_secs),
            ..Timeouts::default()
        }
    }

    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            max_bytes: self.max_download_bytes,
        }
    }

    /// Unset limits keep the extractor defaults.
    pub fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::default();
        if let Some(bytes) = self.max_extract_bytes {
            options = options.max_total_bytes(bytes);
        }
        if let Some(entries) = self.max_entries {
            options = options.max_entries(entries);
        }
        options
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("api_id", &self.api_id)
            .field("api_hash", &self.api_hash.as_ref().map(|_| "<redacted>"))
            .field("work_dir", &self.work_dir)
            .field("probe_timeout_secs", &self.probe_timeout_secs)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("max_download_bytes", &self.max_download_bytes)
            .field("max_extract_bytes", &self.max_extract_bytes)
            .field("max_entries", &self.max_entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unarchive_archive::options::{DEFAULT_MAX_ENTRIES, DEFAULT_MAX_TOTAL_BYTES};

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["unarchive-bot"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn flags_map_to_component_options() {
        let config = parse(&[
            "--bot-token",
            "123:abc",
            "--probe-timeout-secs",
            "5",
            "--download-timeout-secs",
            "60",
            "--max-download-bytes",
            "1024",
            "--max-extract-bytes",
            "4096",
        ]);

        let timeouts = config.timeouts();
        assert_eq!(timeouts.probe, Duration::from_secs(5));
        assert_eq!(timeouts.download, Duration::from_secs(60));
        assert_eq!(timeouts.connect, Timeouts::default().connect);
        assert_eq!(config.fetch_options().max_bytes, Some(1024));
        assert_eq!(config.extract_options().max_total_bytes, Some(4096));
        assert_eq!(config.extract_options().max_entries, Some(DEFAULT_MAX_ENTRIES));
    }

    #[test]
    fn unset_limits_keep_defaults() {
        let config = parse(&["--bot-token", "123:abc"]);
        assert_eq!(
            config.extract_options().max_total_bytes,
            Some(DEFAULT_MAX_TOTAL_BYTES)
        );
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = parse(&["--bot-token", "123:secret-token", "--api-hash", "hash-value"]);
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-token"));
        assert!(!rendered.contains("hash-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
