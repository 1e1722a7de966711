//! # Chatmerge
//!
//! A Rust library for parsing exported chat archives and merging several
//! exports into one deduplicated, chronologically sorted event list.
//!
//! ## Overview
//!
//! Chat history exports come in two JSON layouts, both read by a single
//! [`Extractor`]:
//! - **Wrapped** exports, as written by Telegram Desktop: one object with a
//!   chat `id` and a `messages` array, mixing user messages and service
//!   entries, with text given either as a string or as rich-text segments.
//! - **Flat** lists: an array of self-describing records, each naming its
//!   chat.
//!
//! The layout is picked from the document's root token. Broken individual
//! messages are skipped; broken documents are errors.
//!
//! Repeated or overlapping exports are combined by the [`Merger`]: events
//! are identified by chat and message id, later occurrences replace earlier
//! ones, and the result is ordered by date.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatmerge::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // One file
//!     let events = parse_file_at("export1/result.json")?;
//!     println!("Parsed {} events from single file", events.len());
//!
//!     // Several export folders, each holding a result.json
//!     let merged = merge_from_folders(&["export1", "export2"])?;
//!     if let Some(first) = merged.first() {
//!         println!("First event: {} from {}: {}", first.id, first.from_id, first.text);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`event`] - [`Event`], [`Entity`], [`EventKey`], [`MergedEvents`]
//! - [`extractor`] - [`Extractor`], [`parse_document`], [`parse_file_at`]
//! - [`merger`] - [`Merger`], [`MergeStats`], [`merge_event_sequences`]
//! - [`folders`] - [`FolderMerger`], [`merge_from_folders`]
//! - [`source`] - [`ExportSource`] file-system seam, [`LocalFs`]
//! - [`format`] - [`ExportFormat`](format::ExportFormat), [`DocumentShape`](format::DocumentShape)
//! - [`parsing`] - raw export layouts, rich text and date parsing
//! - [`config`] - [`ExtractConfig`](config::ExtractConfig), [`MergeConfig`](config::MergeConfig)
//! - [`error`] - [`ChatmergeError`], [`Result`]
//!
//! ## Logging
//!
//! Skipped records, dropped entities and merge summaries are reported as
//! `tracing` events at `debug`/`trace` level. Install any subscriber to see
//! them.
//!
//! ## Features
//!
//! - `parallel` (default) - parse folder exports concurrently with rayon.

pub mod config;
pub mod error;
pub mod event;
pub mod extractor;
pub mod folders;
pub mod format;
pub mod merger;
pub mod parsing;
pub mod source;

// Re-export the main types at the crate root for convenience
pub use error::{ChatmergeError, Result};
pub use event::{Entity, Event, EventKey, MergedEvents};
pub use extractor::{Extractor, parse_document, parse_file_at, parse_reader};
pub use folders::{FolderMerger, merge_from_folders};
pub use merger::{MergeStats, Merger, merge_event_sequences};
pub use source::{ExportSource, LocalFs};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatmerge::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{DedupPolicy, ExtractConfig, InvalidRecordPolicy, MergeConfig};
    pub use crate::error::{ChatmergeError, Result};
    pub use crate::event::{Entity, Event, MergedEvents};
    pub use crate::extractor::{Extractor, parse_document, parse_file_at, parse_reader};
    pub use crate::folders::{FolderMerger, merge_from_folders};
    pub use crate::format::{DocumentShape, ExportFormat};
    pub use crate::merger::{MergeStats, Merger, merge_event_sequences};
    pub use crate::source::{ExportSource, LocalFs};
}
