//! Archive extraction for the unarchive bot.
//!
//! # Architecture
//!
//! - `kind.rs` - Archive kinds and their classification
//! - `detect.rs` - Magic number sniffing
//! - `sanitize.rs` - Entry name sanitization (zip-slip prevention)
//! - `extract/` - Shared pipeline plus one entry source per format
//! - `entry.rs` / `options.rs` - Shared types

pub use detect::{detect_from_path, detect_kind};
pub use entry::{ExtractedEntry, ExtractionReport};
pub use error::{Error, Result};
pub use extract::{EntryHeader, EntryKind, EntrySink, EntrySource, extract, extract_with_source};
pub use kind::ArchiveKind;
pub use options::ExtractOptions;
pub use sanitize::{SanitizedPath, sanitize_entry_path};

mod detect;
mod entry;
mod error;
pub mod extract;
mod kind;
pub mod options;
mod sanitize;
