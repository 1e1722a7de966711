//! Normalized event model shared by every export shape.
//!
//! Both export shapes are converted into [`Event`], and the merger produces
//! [`MergedEvents`]. Nothing downstream of the extractor ever sees the raw
//! JSON layout.
//!
//! # Examples
//!
//! ```
//! use chatmerge::{Entity, Event};
//! use chrono::{TimeZone, Utc};
//!
//! let date = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
//! let event = Event::new(1, 100, date)
//!     .with_from_id("user123456")
//!     .with_text("Hello @user")
//!     .with_entities(vec![Entity::new("mention", "@user", 6, 5)]);
//!
//! assert_eq!(event.chat_id, 100);
//! assert_eq!(event.entities[0].end(), 11);
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chatmerge::Event;
//! use chrono::{TimeZone, Utc};
//!
//! let event = Event::new(7, 42, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
//! let json = serde_json::to_string(&event)?;
//!
//! assert!(json.contains(r#""chat_id":42"#));
//! // entities are omitted when empty
//! assert!(!json.contains("entities"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DedupPolicy;

/// A single normalized chat message.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `id` | `i64` | Message id, unique within one chat only |
/// | `from_id` | `String` | Stable sender identifier (e.g. `user123456`) |
/// | `text` | `String` | Resolved plain text |
/// | `date` | `DateTime<Utc>` | When the message was sent |
/// | `chat_id` | `i64` | Chat the message belongs to |
/// | `entities` | `Vec<Entity>` | Rich-text spans, possibly empty |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Message id as given by the export.
    pub id: i64,

    /// Sender identifier, not the display name.
    #[serde(default)]
    pub from_id: String,

    /// Fully resolved plain text.
    #[serde(default)]
    pub text: String,

    /// Send time. Exports without an offset are read as UTC.
    pub date: DateTime<Utc>,

    /// Chat the message belongs to.
    pub chat_id: i64,

    /// Marked spans within `text`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
}

impl Event {
    /// Creates an event with empty sender, text and entities.
    pub fn new(id: i64, chat_id: i64, date: DateTime<Utc>) -> Self {
        Self {
            id,
            from_id: String::new(),
            text: String::new(),
            date,
            chat_id,
            entities: Vec::new(),
        }
    }

    /// Builder method to set the sender identifier.
    #[must_use]
    pub fn with_from_id(mut self, from_id: impl Into<String>) -> Self {
        self.from_id = from_id.into();
        self
    }

    /// Builder method to set the text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Builder method to set the entities.
    #[must_use]
    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    /// Returns the deduplication key of this event under `policy`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatmerge::Event;
    /// use chatmerge::config::DedupPolicy;
    /// use chrono::Utc;
    ///
    /// let a = Event::new(1, 100, Utc::now());
    /// let b = Event::new(1, 200, Utc::now());
    ///
    /// assert_ne!(a.key(DedupPolicy::Composite), b.key(DedupPolicy::Composite));
    /// assert_eq!(a.key(DedupPolicy::MessageId), b.key(DedupPolicy::MessageId));
    /// ```
    pub fn key(&self, policy: DedupPolicy) -> EventKey {
        match policy {
            DedupPolicy::Composite => EventKey {
                chat_id: Some(self.chat_id),
                id: self.id,
            },
            DedupPolicy::MessageId => EventKey {
                chat_id: None,
                id: self.id,
            },
        }
    }

    /// Returns the length of the resolved text in characters.
    pub fn text_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// A marked span of rich text, such as a mention, link or hashtag.
///
/// `offset` and `length` count characters of the owning event's text.
/// Spans running past the end of the text are accepted unless the
/// extractor is configured to validate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Category label (free-form, e.g. `mention`, `hashtag`, `link`)
    #[serde(rename = "type")]
    pub kind: String,

    /// The literal substring.
    pub text: String,

    /// Start position within the event text.
    pub offset: usize,

    /// Span length.
    pub length: usize,
}

impl Entity {
    pub fn new(
        kind: impl Into<String>,
        text: impl Into<String>,
        offset: usize,
        length: usize,
    ) -> Self {
        Self {
            kind: kind.into(),
            text: text.into(),
            offset,
            length,
        }
    }

    /// Position just past the last character of the span.
    pub fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    /// Returns `true` if the span lies within a text of `text_len` characters.
    pub fn fits(&self, text_len: usize) -> bool {
        self.end() <= text_len
    }
}

/// Identity of an event for deduplication.
///
/// `chat_id` is `None` under [`DedupPolicy::MessageId`]. Keys are ordered
/// by chat, then id, which is also the tie-break order for events sharing a
/// date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKey {
    pub chat_id: Option<i64>,
    pub id: i64,
}

/// Deduplicated events sorted ascending by date.
///
/// Serializes as `{"events": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedEvents {
    pub events: Vec<Event>,
}

impl MergedEvents {
    /// Wraps events that are already deduplicated and sorted.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// The earliest event.
    pub fn first(&self) -> Option<&Event> {
        self.events.first()
    }

    /// The latest event.
    pub fn last(&self) -> Option<&Event> {
        self.events.last()
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl IntoIterator for MergedEvents {
    type Item = Event;
    type IntoIter = std::vec::IntoIter<Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a MergedEvents {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
