//! Chat bot that unpacks archives and sends back every file.
//!
//! # Architecture
//!
//! - `transport.rs` - Messaging abstraction and request types
//! - `resolver.rs` - Classify an attachment or link before downloading
//! - `pipeline.rs` - Download, extract, deliver, clean up
//! - `command.rs` / `handler.rs` - Route inbound messages
//! - `telegram.rs` - Bot API transport
//! - `config.rs` / `layout.rs` - Settings and working directories

pub mod command;
pub mod config;
mod error;
pub mod handler;
pub mod layout;
pub mod pipeline;
pub mod resolver;
pub mod telegram;
pub mod transport;

pub use command::Command;
pub use config::Config;
pub use error::{PipelineError, Result};
pub use handler::{Action, IncomingMessage, handle, route};
pub use layout::WorkingDirs;
pub use pipeline::{Delivery, Pipeline};
pub use resolver::{Origin, Rejection, ResolvedSource, resolve};
pub use transport::{
    Attachment, Conversation, RequestContext, SourceMessage, Transport, TransportError,
};
