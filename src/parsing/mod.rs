//! Raw export layouts and their conversion into [`Event`]s.
//!
//! - [`wrapped`] - object-rooted exports (one chat, `messages` array)
//! - [`flat`] - array-rooted exports (one record per message)
//! - [`text`] - rich-text `text` field resolution
//! - [`date`] - timestamp parsing with layout fallback
//!
//! The [`Extractor`](crate::Extractor) picks the layout; the functions here
//! only convert already deserialized records.

pub mod date;
pub mod flat;
pub mod text;
pub mod wrapped;

use std::fmt;

pub use date::{parse_export_date, parse_naive_date, parse_rfc3339_date};
pub use flat::{FlatChat, FlatRecord, parse_flat_record};
pub use text::{RichText, TextSegment};
pub use wrapped::{RawEntity, WrappedExport, WrappedMessage, parse_wrapped_message, resolve_entities};

use crate::Event;
use crate::config::ExtractConfig;

/// Why a single record did not become an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Service entry or any other non-`message` type.
    NotAMessage(String),
    MissingId,
    MissingDate,
    /// Date present but in no accepted layout.
    InvalidDate(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAMessage(kind) => write!(f, "entry type '{}' is not a message", kind),
            SkipReason::MissingId => f.write_str("record has no id"),
            SkipReason::MissingDate => f.write_str("record has no date"),
            SkipReason::InvalidDate(input) => write!(f, "unparseable date '{}'", input),
        }
    }
}

/// Applies extraction settings that do not depend on the layout.
///
/// With entity validation on, spans ending past the text are dropped.
pub(crate) fn finish_event(mut event: Event, config: &ExtractConfig) -> Event {
    if config.validate_entities && !event.entities.is_empty() {
        let text_len = event.text_len();
        let before = event.entities.len();
        event.entities.retain(|entity| entity.fits(text_len));
        let dropped = before - event.entities.len();
        if dropped > 0 {
            tracing::debug!(
                chat_id = event.chat_id,
                id = event.id,
                dropped,
                text_len,
                "dropped entities outside message text"
            );
        }
    }
    event
}
