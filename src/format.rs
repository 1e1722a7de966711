//! Export format and document shape detection.
//!
//! Selection happens in two steps. The file name decides the
//! [`ExportFormat`]; for JSON, the first token of the document decides the
//! [`DocumentShape`].
//!
//! # Example
//!
//! ```rust
//! use chatmerge::format::{DocumentShape, ExportFormat};
//!
//! assert_eq!(ExportFormat::from_path("export/result.JSON").unwrap(), ExportFormat::Json);
//! assert!(ExportFormat::from_path("messages.html").unwrap_err().is_not_implemented());
//! assert!(ExportFormat::from_path("notes.txt").unwrap_err().is_unsupported_format());
//!
//! assert_eq!(DocumentShape::detect(b"  {\"messages\": []}"), Some(DocumentShape::Wrapped));
//! assert_eq!(DocumentShape::detect(b"[]"), Some(DocumentShape::Flat));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ChatmergeError;

/// UTF-8 byte order mark, tolerated in front of a document.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// File formats of chat exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ExportFormat {
    /// JSON export (`result.json`)
    Json,

    /// HTML export (`messages.html`), recognized but not parsed
    #[serde(alias = "htm")]
    Html,
}

impl ExportFormat {
    /// Returns the canonical file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    /// Returns `true` if documents in this format can be parsed.
    pub fn is_implemented(&self) -> bool {
        matches!(self, ExportFormat::Json)
    }

    /// Returns all known formats.
    pub fn all() -> &'static [ExportFormat] {
        &[ExportFormat::Json, ExportFormat::Html]
    }

    /// Detects the format from a file name, comparing extensions
    /// case-insensitively. A name that is only an extension (`.json`)
    /// counts as that extension.
    ///
    /// Only formats that can be parsed are returned; see
    /// [`from_extension`](Self::from_extension) for the full mapping.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatmergeError> {
        let format = Self::from_extension(extension_of(path.as_ref()))?;
        if format.is_implemented() {
            Ok(format)
        } else {
            Err(ChatmergeError::not_implemented(format.name()))
        }
    }

    /// Maps an extension (without dot) to a known format.
    pub fn from_extension(ext: &str) -> Result<Self, ChatmergeError> {
        match ext.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "html" | "htm" => Ok(ExportFormat::Html),
            _ => Err(ChatmergeError::unsupported_format(ext)),
        }
    }

    fn name(self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Html => "HTML",
        }
    }
}

/// Extension without the dot, or `""` when there is none.
fn extension_of(path: &Path) -> &str {
    if let Some(ext) = path.extension() {
        return ext.to_str().unwrap_or("");
    }
    // std treats ".json" as a dotfile with no extension
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_prefix('.'))
        .unwrap_or("")
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ChatmergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim_start_matches('.'))
    }
}

/// Layout of a JSON export document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentShape {
    /// Object root: one chat with a `messages` array.
    Wrapped,

    /// Array root: one record per message, each naming its chat.
    Flat,
}

impl DocumentShape {
    /// Detects the shape from the first significant byte of a document.
    ///
    /// Whitespace and a UTF-8 byte order mark are skipped. Returns `None`
    /// when the document does not start with `{` or `[`.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        let body = strip_bom(bytes);
        match body.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => Some(DocumentShape::Wrapped),
            Some(b'[') => Some(DocumentShape::Flat),
            _ => None,
        }
    }

    /// Short human-readable name, used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentShape::Wrapped => "wrapped export",
            DocumentShape::Flat => "flat list",
        }
    }
}

impl std::fmt::Display for DocumentShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returns `bytes` without a leading UTF-8 byte order mark.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}
