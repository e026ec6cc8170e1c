//! HTTP probing and downloading for the unarchive bot.
//!
//! # Architecture
//!
//! - [`data`] - Plain configuration and result types
//! - [`core`] - Pure URL helpers
//! - [`effects`] - I/O behind the [`HttpClient`] trait

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use crate::core::{file_name_from_url, is_http_url, parse_http_url};
pub use data::{FetchOptions, ResourceInfo, Timeouts};
pub use effects::{BoxStream, Fetcher, HttpClient};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{FetchError, Result};
