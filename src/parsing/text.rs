//! Rich-text resolution for the `text` field of wrapped exports.
//!
//! The field is either a plain string or an array mixing strings and
//! objects such as `{"type": "mention", "text": "@user"}`. It is decoded
//! into [`RichText`] and flattened once, so events only ever carry a
//! `String`.

use serde::Deserialize;
use serde::de::IgnoredAny;

/// The `text` field of a wrapped-export message.
///
/// # Example
///
/// ```rust
/// use chatmerge::parsing::RichText;
///
/// let text: RichText = serde_json::from_str(r#"["Hello ", {"text": "@user"}, "!"]"#)?;
/// assert_eq!(text.resolve(), "Hello @user!");
///
/// let text: RichText = serde_json::from_str("null")?;
/// assert_eq!(text.resolve(), "");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RichText {
    /// A plain string, used verbatim.
    Plain(String),

    /// Ordered segments, concatenated without separator.
    Segments(Vec<TextSegment>),

    /// Null, numbers, objects and anything else; resolves to empty text.
    Unsupported(IgnoredAny),
}

/// One element of a rich-text array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextSegment {
    Plain(String),

    /// An object carrying a string `text` field; other fields are ignored.
    Span { text: String },

    /// Any other element; contributes nothing.
    Unsupported(IgnoredAny),
}

impl RichText {
    /// Flattens the field into plain text.
    pub fn resolve(&self) -> String {
        match self {
            RichText::Plain(s) => s.clone(),
            RichText::Segments(segments) => segments
                .iter()
                .filter_map(TextSegment::as_str)
                .collect::<String>(),
            RichText::Unsupported(_) => String::new(),
        }
    }

    /// Consumes the field and returns plain text, reusing the string when
    /// it is already plain.
    pub fn into_text(self) -> String {
        match self {
            RichText::Plain(s) => s,
            other => other.resolve(),
        }
    }
}

impl Default for RichText {
    fn default() -> Self {
        RichText::Unsupported(IgnoredAny)
    }
}

impl TextSegment {
    /// Returns the text this segment contributes, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TextSegment::Plain(s) | TextSegment::Span { text: s } => Some(s.as_str()),
            TextSegment::Unsupported(_) => None,
        }
    }
}
