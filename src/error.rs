//! Unified error types for chatmerge.
//!
//! Structural failures (unreadable file, malformed JSON, unknown format)
//! surface as a [`ChatmergeError`]. Problems confined to a single message,
//! such as an unparseable date in a wrapped export, never reach the caller:
//! the message is skipped and the rest of the batch continues.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for chatmerge operations.
///
/// # Example
///
/// ```rust
/// use chatmerge::error::Result;
/// use chatmerge::Event;
///
/// fn load() -> Result<Vec<Event>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatmergeError>;

/// The error type for all chatmerge operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatmergeError {
    /// The export file (or a folder entry) could not be read.
    ///
    /// Never retried. The path is set whenever the failing read came from
    /// a known location.
    #[error("IO error{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Io {
        /// The underlying IO error
        #[source]
        source: io::Error,
        /// The file being read, if known
        path: Option<PathBuf>,
    },

    /// The document is not valid JSON, or does not match the export shape.
    #[error("Failed to parse {format}{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The shape being parsed (e.g., "wrapped export", "flat list")
        format: &'static str,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The document is well-formed JSON but cannot be an export.
    ///
    /// This occurs when:
    /// - The root value is neither an object nor an array
    /// - A flat-list record is rejected under a strict record policy
    #[error("Invalid {format}: {message}")]
    InvalidFormat {
        /// The shape that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A flat-list record carries a date that cannot be parsed.
    ///
    /// Only raised when invalid records are rejected instead of skipped.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The date string found in the record
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The file extension is not a known export format.
    #[error("Unsupported file format: '{extension}'")]
    UnsupportedFormat {
        /// The extension found on the file name (may be empty)
        extension: String,
    },

    /// The export format is recognized but has no parser.
    #[error("{format} parsing is not implemented")]
    NotImplemented {
        /// Human-readable format name
        format: &'static str,
    },
}

impl From<io::Error> for ChatmergeError {
    fn from(source: io::Error) -> Self {
        ChatmergeError::Io { source, path: None }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatmergeError {
    /// Creates an IO error tied to a file path.
    pub fn io(source: io::Error, path: impl Into<PathBuf>) -> Self {
        ChatmergeError::Io {
            source,
            path: Some(path.into()),
        }
    }

    /// Creates a JSON parse error for the given shape.
    pub fn parse(format: &'static str, source: serde_json::Error) -> Self {
        ChatmergeError::Parse {
            format,
            source,
            path: None,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatmergeError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>, expected: &'static str) -> Self {
        ChatmergeError::InvalidDate {
            input: input.into(),
            expected,
        }
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        ChatmergeError::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Creates a not-implemented error.
    pub fn not_implemented(format: &'static str) -> Self {
        ChatmergeError::NotImplemented { format }
    }

    /// Attaches a file path to IO and parse errors that have none yet.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_path(self, file: &Path) -> Self {
        match self {
            ChatmergeError::Io { source, path: None } => ChatmergeError::Io {
                source,
                path: Some(file.to_path_buf()),
            },
            ChatmergeError::Parse {
                format,
                source,
                path: None,
            } => ChatmergeError::Parse {
                format,
                source,
                path: Some(file.to_path_buf()),
            },
            other => other,
        }
    }

    /// Returns the file path attached to this error, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ChatmergeError::Io { path, .. } | ChatmergeError::Parse { path, .. } => {
                path.as_deref()
            }
            _ => None,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatmergeError::Io { .. })
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatmergeError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatmergeError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatmergeError::InvalidDate { .. })
    }

    /// Returns `true` if the file extension is unknown.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ChatmergeError::UnsupportedFormat { .. })
    }

    /// Returns `true` if the format is known but has no parser.
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, ChatmergeError::NotImplemented { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
