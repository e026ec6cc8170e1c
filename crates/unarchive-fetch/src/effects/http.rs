use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;

use crate::data::ResourceInfo;
use crate::error::Result;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Asynchronous HTTP client abstraction.
///
/// Implementations follow redirects, apply their own timeouts and map
/// non-success statuses to [`FetchError::Status`](crate::FetchError::Status).
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - In-memory clients in tests
pub trait HttpClient: Send + Sync {
    /// Open a streaming GET and return the response body.
    fn stream(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<BoxStream<'static, Result<Bytes>>>> + Send;

    /// Metadata-only request. Nothing of the body is transferred.
    fn head(&self, url: &str) -> impl Future<Output = Result<ResourceInfo>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use futures_util::StreamExt;
    use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};

    use super::*;
    use crate::data::Timeouts;
    use crate::error::FetchError;

    /// Production HTTP client implementation using reqwest.
    #[derive(Clone, Debug)]
    pub struct ReqwestClient {
        client: reqwest::Client,
        timeouts: Timeouts,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default timeouts.
        pub fn new() -> Result<Self> {
            Self::with_timeouts(Timeouts::default())
        }

        pub fn with_timeouts(timeouts: Timeouts) -> Result<Self> {
            let client = reqwest::Client::builder()
                .connect_timeout(timeouts.connect)
                .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| FetchError::Network(e.to_string()))?;
            Ok(Self { client, timeouts })
        }

        pub fn timeouts(&self) -> Timeouts {
            self.timeouts
        }
    }

    impl HttpClient for ReqwestClient {
        async fn stream(&self, url: &str) -> Result<BoxStream<'static, Result<Bytes>>> {
            let response = self
                .client
                .get(url)
                .timeout(self.timeouts.download)
                .send()
                .await?
                .error_for_status()?;

            let stream = response.bytes_stream().map(|chunk| chunk.map_err(FetchError::from));
            Ok(Box::pin(stream))
        }

        async fn head(&self, url: &str) -> Result<ResourceInfo> {
            let response = self
                .client
                .head(url)
                .timeout(self.timeouts.probe)
                .send()
                .await?
                .error_for_status()?;

            let headers = response.headers();
            let content_type = headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let content_length = headers
                .get(CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());

            Ok(ResourceInfo {
                content_type,
                content_length,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
