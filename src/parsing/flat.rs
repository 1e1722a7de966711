//! Array-rooted exports: one self-describing record per message.
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "from_id": "user123",
//!     "text": "Hello",
//!     "date": "2026-01-01T00:00:00Z",
//!     "chat": {"id": 100},
//!     "entities": [{"type": "hashtag", "text": "#x", "offset": 0, "length": 2}]
//!   }
//! ]
//! ```
//!
//! Records need no type filtering and already carry final entities. A
//! top-level `chat_id` is accepted in place of `chat`, so serialized
//! [`Event`]s read back unchanged.

use serde::Deserialize;

use super::date::{RFC3339_EXPECTED, parse_rfc3339_date};
use super::{SkipReason, finish_event};
use crate::config::{ExtractConfig, InvalidRecordPolicy};
use crate::error::{ChatmergeError, Result};
use crate::{Entity, Event};

const FORMAT: &str = "flat list";

/// One element of a flat export.
#[derive(Debug, Deserialize)]
pub struct FlatRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub from_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub chat: Option<FlatChat>,
    #[serde(default)]
    pub chat_id: Option<i64>,
    #[serde(default)]
    pub entities: Option<Vec<Entity>>,
}

/// The nested `chat` object of a record.
#[derive(Debug, Deserialize)]
pub struct FlatChat {
    #[serde(default)]
    pub id: Option<i64>,
}

impl FlatRecord {
    /// Chat id from `chat.id`, then `chat_id`, else 0.
    pub fn resolved_chat_id(&self) -> i64 {
        self.chat
            .as_ref()
            .and_then(|chat| chat.id)
            .or(self.chat_id)
            .unwrap_or(0)
    }
}

/// Converts one record into an [`Event`]. A missing id becomes 0.
pub fn parse_flat_record(record: FlatRecord) -> std::result::Result<Event, SkipReason> {
    let chat_id = record.resolved_chat_id();
    let id = record.id.unwrap_or(0);
    let raw_date = record.date.ok_or(SkipReason::MissingDate)?;
    let date = parse_rfc3339_date(&raw_date).ok_or_else(|| SkipReason::InvalidDate(raw_date))?;

    Ok(Event::new(id, chat_id, date)
        .with_from_id(record.from_id.unwrap_or_default())
        .with_text(record.text.unwrap_or_default())
        .with_entities(record.entities.unwrap_or_default()))
}

/// Converts every record, in document order.
///
/// Records without a usable date are skipped or fail the whole document,
/// depending on [`ExtractConfig::flat_invalid_records`]. Under `Reject` a
/// missing id fails the document too; otherwise it reads as 0.
pub fn extract(records: Vec<FlatRecord>, config: &ExtractConfig) -> Result<Vec<Event>> {
    let total = records.len();
    let mut events = Vec::with_capacity(total);
    let strict = config.flat_invalid_records == InvalidRecordPolicy::Reject;

    for (index, record) in records.into_iter().enumerate() {
        if strict && record.id.is_none() {
            return Err(reject(SkipReason::MissingId, index));
        }
        match parse_flat_record(record) {
            Ok(event) => events.push(finish_event(event, config)),
            Err(reason) => match config.flat_invalid_records {
                InvalidRecordPolicy::Skip => {
                    tracing::debug!(index, %reason, "skipping flat record");
                }
                InvalidRecordPolicy::Reject => return Err(reject(reason, index)),
            },
        }
    }

    tracing::debug!(
        kept = events.len(),
        skipped = total - events.len(),
        "extracted flat list"
    );
    Ok(events)
}

fn reject(reason: SkipReason, index: usize) -> ChatmergeError {
    match reason {
        SkipReason::InvalidDate(input) => ChatmergeError::invalid_date(input, RFC3339_EXPECTED),
        other => ChatmergeError::invalid_format(FORMAT, format!("record {}: {}", index, other)),
    }
}
