//! Object-rooted chat exports, as written by Telegram Desktop.
//!
//! ```json
//! {
//!   "name": "Chat Name",
//!   "type": "personal_chat",
//!   "id": 100,
//!   "messages": [
//!     {
//!       "id": 1,
//!       "type": "message",
//!       "date": "2026-01-01T00:00:00",
//!       "from": "User One",
//!       "from_id": "user123456",
//!       "text": "Hello" | ["Hello ", {"type": "mention", "text": "@user"}],
//!       "text_entities": [{"type": "mention", "text": "@user", "offset": 6, "length": 5}]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Deserializer};

use super::date::parse_export_date;
use super::text::RichText;
use super::{SkipReason, finish_event};
use crate::config::ExtractConfig;
use crate::{Entity, Event};

/// Root object of a wrapped export.
#[derive(Debug, Deserialize)]
pub struct WrappedExport {
    /// Chat title
    #[serde(default)]
    pub name: Option<String>,
    /// Chat kind (`personal_chat`, `private_group`, ...)
    #[serde(default, rename = "type")]
    pub chat_type: Option<String>,
    /// Chat id, copied into every event (0 when absent or null)
    #[serde(default)]
    pub id: Option<i64>,
    /// Absent or null for exports without a message history
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<WrappedMessage>,
}

impl WrappedExport {
    pub fn chat_id(&self) -> i64 {
        self.id.unwrap_or(0)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One entry of the `messages` array.
#[derive(Debug, Deserialize)]
pub struct WrappedMessage {
    #[serde(default)]
    pub id: Option<i64>,
    /// Entry type (we only keep "message")
    #[serde(default, rename = "type")]
    pub msg_type: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub from_id: Option<String>,
    #[serde(default)]
    pub text: RichText,
    #[serde(default)]
    pub text_entities: Option<Vec<RawEntity>>,
}

/// An element of `text_entities`.
///
/// Telegram Desktop writes only `type` and `text`; positions are then
/// derived from the preceding entities.
#[derive(Debug, Default, Deserialize)]
pub struct RawEntity {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub length: Option<i64>,
}

/// Converts raw entities, filling in missing positions.
///
/// A missing `offset` continues where the previous entity ended; a missing
/// `length` is the character count of the entity text. Negative values
/// count as missing.
pub fn resolve_entities(raw: Vec<RawEntity>) -> Vec<Entity> {
    let mut cursor = 0usize;
    raw.into_iter()
        .map(|entity| {
            let text = entity.text.unwrap_or_default();
            let offset = entity
                .offset
                .and_then(|o| usize::try_from(o).ok())
                .unwrap_or(cursor);
            let length = entity
                .length
                .and_then(|l| usize::try_from(l).ok())
                .unwrap_or_else(|| text.chars().count());
            cursor = offset.saturating_add(length);
            Entity::new(entity.kind.unwrap_or_default(), text, offset, length)
        })
        .collect()
}

/// Converts one entry into an [`Event`] of chat `chat_id`.
pub fn parse_wrapped_message(msg: WrappedMessage, chat_id: i64) -> Result<Event, SkipReason> {
    if msg.msg_type.as_deref() != Some("message") {
        return Err(SkipReason::NotAMessage(msg.msg_type.unwrap_or_default()));
    }

    let id = msg.id.unwrap_or(0);
    let raw_date = msg.date.ok_or(SkipReason::MissingDate)?;
    let date = parse_export_date(&raw_date).ok_or_else(|| SkipReason::InvalidDate(raw_date))?;

    Ok(Event::new(id, chat_id, date)
        .with_from_id(msg.from_id.unwrap_or_default())
        .with_text(msg.text.into_text())
        .with_entities(resolve_entities(msg.text_entities.unwrap_or_default())))
}

/// Converts every usable message of `export`, in document order.
///
/// Broken entries are dropped; this never fails.
pub fn extract(export: WrappedExport, config: &ExtractConfig) -> Vec<Event> {
    let chat_id = export.chat_id();
    let total = export.messages.len();
    let mut events = Vec::with_capacity(total);

    for msg in export.messages {
        match parse_wrapped_message(msg, chat_id) {
            Ok(event) => events.push(finish_event(event, config)),
            Err(SkipReason::NotAMessage(kind)) => {
                tracing::trace!(chat_id, kind = %kind, "skipping non-message entry");
            }
            Err(reason) => {
                tracing::debug!(chat_id, %reason, "skipping message");
            }
        }
    }

    tracing::debug!(
        chat_id,
        chat = export.name.as_deref().unwrap_or(""),
        kept = events.len(),
        skipped = total - events.len(),
        "extracted wrapped export"
    );
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn message(json: &str) -> WrappedMessage {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_basic_message() {
        let msg = message(
            r#"{"id": 1, "type": "message", "date": "2026-01-01T00:00:00",
                "from_id": "user123456", "from": "User One", "text": "Hello"}"#,
        );
        let event = parse_wrapped_message(msg, 100).unwrap();
        assert_eq!(event.id, 1);
        assert_eq!(event.chat_id, 100);
        assert_eq!(event.from_id, "user123456");
        assert_eq!(event.text, "Hello");
        assert_eq!(event.date, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert!(event.entities.is_empty());
    }

    #[test]
    fn test_skip_service_message() {
        let msg = message(
            r#"{"id": 2, "type": "service", "date": "2026-01-01T00:00:00", "action": "pin_message"}"#,
        );
        assert_eq!(
            parse_wrapped_message(msg, 100),
            Err(SkipReason::NotAMessage("service".into()))
        );
    }

    #[test]
    fn test_skip_invalid_date() {
        let msg = message(r#"{"id": 3, "type": "message", "date": "not-a-date", "text": "x"}"#);
        assert_eq!(
            parse_wrapped_message(msg, 100),
            Err(SkipReason::InvalidDate("not-a-date".into()))
        );
    }

    #[test]
    fn test_missing_id_defaults_to_zero() {
        let msg = message(r#"{"type": "message", "date": "2026-01-01T00:00:00", "text": "x"}"#);
        let event = parse_wrapped_message(msg, 1).unwrap();
        assert_eq!(event.id, 0);
        assert_eq!(event.text, "x");
    }

    #[test]
    fn test_skip_missing_date() {
        let msg = message(r#"{"id": 4, "type": "message"}"#);
        assert_eq!(parse_wrapped_message(msg, 1), Err(SkipReason::MissingDate));
    }

    #[test]
    fn test_null_text_is_empty() {
        let msg = message(r#"{"id": 5, "type": "message", "date": "2026-01-01T00:00:00", "text": null}"#);
        assert_eq!(parse_wrapped_message(msg, 1).unwrap().text, "");

        let msg = message(r#"{"id": 6, "type": "message", "date": "2026-01-01T00:00:00"}"#);
        assert_eq!(parse_wrapped_message(msg, 1).unwrap().text, "");
    }

    #[test]
    fn test_explicit_entity_positions_are_kept() {
        let msg = message(
            r#"{"id": 1, "type": "message", "date": "2026-01-01T00:00:00", "text": "Hello @user",
                "text_entities": [{"type": "mention", "text": "@user", "offset": 6, "length": 5}]}"#,
        );
        let event = parse_wrapped_message(msg, 1).unwrap();
        assert_eq!(event.entities, vec![Entity::new("mention", "@user", 6, 5)]);
    }

    #[test]
    fn test_entity_positions_are_derived() {
        let entities = resolve_entities(vec![
            RawEntity {
                kind: Some("plain".into()),
                text: Some("Привет ".into()),
                ..RawEntity::default()
            },
            RawEntity {
                kind: Some("mention".into()),
                text: Some("@user".into()),
                ..RawEntity::default()
            },
        ]);
        assert_eq!(entities[0].offset, 0);
        assert_eq!(entities[0].length, 7);
        assert_eq!(entities[1].offset, 7);
        assert_eq!(entities[1].length, 5);
    }

    #[test]
    fn test_negative_entity_positions_are_derived() {
        let entities = resolve_entities(vec![RawEntity {
            kind: Some("bold".into()),
            text: Some("hey".into()),
            offset: Some(-1),
            length: Some(-4),
        }]);
        assert_eq!(entities[0].offset, 0);
        assert_eq!(entities[0].length, 3);
    }

    #[test]
    fn test_extract_filters_and_keeps_order() {
        let export: WrappedExport = serde_json::from_str(
            r#"{"name": "Test Chat", "type": "personal_chat", "id": 100, "messages": [
                {"id": 1, "type": "message", "date": "2026-01-01T00:00:02", "text": "b"},
                {"id": 2, "type": "service", "date": "2026-01-01T00:00:00"},
                {"id": 3, "type": "message", "date": "bad", "text": "x"},
                {"id": 4, "type": "message", "date": "2026-01-01T00:00:01Z", "text": "a"}
            ]}"#,
        )
        .unwrap();
        let events = extract(export, &ExtractConfig::default());
        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert!(events.iter().all(|e| e.chat_id == 100));
    }

    #[test]
    fn test_missing_or_null_messages_is_empty() {
        let export: WrappedExport = serde_json::from_str(r#"{"name": "x", "id": 1}"#).unwrap();
        assert!(export.messages.is_empty());

        let export: WrappedExport = serde_json::from_str(r#"{"id": 1, "messages": null}"#).unwrap();
        assert!(export.messages.is_empty());
        assert!(extract(export, &ExtractConfig::default()).is_empty());
    }

    #[test]
    fn test_null_chat_id_is_zero() {
        let export: WrappedExport = serde_json::from_str(
            r#"{"id": null, "messages": [{"id": 1, "type": "message", "date": "2026-01-01T00:00:00"}]}"#,
        )
        .unwrap();
        assert_eq!(export.chat_id(), 0);
        assert_eq!(extract(export, &ExtractConfig::default())[0].chat_id, 0);
    }

    #[test]
    fn test_messages_of_wrong_type_fail() {
        assert!(serde_json::from_str::<WrappedExport>(r#"{"messages": "none"}"#).is_err());
    }
}
