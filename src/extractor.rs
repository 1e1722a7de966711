//! Turning one export document into events.
//!
//! [`Extractor`] is the single entry point for both export layouts: the file
//! name selects the format and the root JSON token selects the layout, so
//! callers never need to know which one they hold.
//!
//! # Example
//!
//! ```rust
//! use chatmerge::Extractor;
//!
//! let json = br#"{
//!     "name": "Test Chat",
//!     "type": "personal_chat",
//!     "id": 100,
//!     "messages": [
//!         {"id": 1, "type": "message", "date": "2026-01-01T00:00:00",
//!          "from_id": "user123456", "from": "User One",
//!          "text": ["Hello ", {"type": "mention", "text": "@user"}, "!"]},
//!         {"id": 2, "type": "service", "date": "2026-01-01T00:00:01"}
//!     ]
//! }"#;
//!
//! let events = Extractor::new().parse_document(json, "result.json")?;
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].text, "Hello @user!");
//! # Ok::<(), chatmerge::ChatmergeError>(())
//! ```

use std::fs;
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::Event;
use crate::config::ExtractConfig;
use crate::error::{ChatmergeError, Result};
use crate::format::{DocumentShape, ExportFormat, strip_bom};
use crate::parsing::{FlatRecord, WrappedExport, flat, wrapped};

/// Label used for errors raised before the layout is known.
const DOCUMENT: &str = "export document";

/// Parses export documents into events.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractConfig,
}

impl Extractor {
    /// Creates an extractor with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an extractor with custom settings.
    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Parses raw document bytes.
    ///
    /// `filename_hint` only contributes its extension: `.json` is parsed,
    /// `.html` fails with [`ChatmergeError::NotImplemented`], anything else
    /// with [`ChatmergeError::UnsupportedFormat`].
    ///
    /// # Errors
    ///
    /// Returns [`ChatmergeError::Parse`] for malformed JSON and
    /// [`ChatmergeError::InvalidFormat`] when the root is neither an object
    /// nor an array. Individual broken messages are skipped instead.
    pub fn parse_document(&self, bytes: &[u8], filename_hint: impl AsRef<Path>) -> Result<Vec<Event>> {
        let format = ExportFormat::from_path(filename_hint.as_ref())?;
        tracing::trace!(hint = %filename_hint.as_ref().display(), %format, "selected export format");
        self.parse_json(bytes)
    }

    /// Parses a JSON document, choosing the layout from its root token.
    pub fn parse_json(&self, bytes: &[u8]) -> Result<Vec<Event>> {
        let body = strip_bom(bytes);

        match DocumentShape::detect(body) {
            Some(shape @ DocumentShape::Wrapped) => {
                tracing::trace!(%shape, bytes = body.len(), "detected document shape");
                let export: WrappedExport = serde_json::from_slice(body)
                    .map_err(|e| ChatmergeError::parse(shape.label(), e))?;
                Ok(wrapped::extract(export, &self.config))
            }
            Some(shape @ DocumentShape::Flat) => {
                tracing::trace!(%shape, bytes = body.len(), "detected document shape");
                let records: Vec<FlatRecord> = serde_json::from_slice(body)
                    .map_err(|e| ChatmergeError::parse(shape.label(), e))?;
                flat::extract(records, &self.config)
            }
            None => Err(unknown_root(body)),
        }
    }

    /// Reads a whole document from `reader`, then parses it.
    pub fn parse_reader<R: Read>(&self, mut reader: R, filename_hint: impl AsRef<Path>) -> Result<Vec<Event>> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.parse_document(&bytes, filename_hint)
    }

    /// Reads and parses the export file at `path`.
    ///
    /// The format is checked before the file is opened. Read and parse
    /// errors carry `path`.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<Event>> {
        let path = path.as_ref();
        ExportFormat::from_path(path)?;
        let bytes = fs::read(path).map_err(|e| ChatmergeError::io(e, path))?;
        self.parse_document(&bytes, path).map_err(|e| e.with_path(path))
    }
}

/// Builds the error for a document that starts with neither `{` nor `[`.
fn unknown_root(body: &[u8]) -> ChatmergeError {
    match serde_json::from_slice::<Value>(body) {
        Err(e) => ChatmergeError::parse(DOCUMENT, e),
        Ok(value) => ChatmergeError::invalid_format(
            DOCUMENT,
            format!("expected an object or array at the root, found {}", value_kind(&value)),
        ),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses raw document bytes with default settings.
///
/// See [`Extractor::parse_document`].
pub fn parse_document(bytes: &[u8], filename_hint: impl AsRef<Path>) -> Result<Vec<Event>> {
    Extractor::new().parse_document(bytes, filename_hint)
}

/// Reads a document from `reader` and parses it with default settings.
pub fn parse_reader<R: Read>(reader: R, filename_hint: impl AsRef<Path>) -> Result<Vec<Event>> {
    Extractor::new().parse_reader(reader, filename_hint)
}

/// Reads and parses the export file at `path` with default settings.
pub fn parse_file_at(path: impl AsRef<Path>) -> Result<Vec<Event>> {
    Extractor::new().parse_file(path)
}
