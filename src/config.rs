//! Configuration types for extraction and merging.
//!
//! Defaults reproduce the tolerant behavior expected of chat archives:
//! bad records are skipped, entity spans are not checked, and duplicates are
//! identified by chat and message id together.
//!
//! # Example
//!
//! ```rust
//! use chatmerge::config::{DedupPolicy, ExtractConfig, InvalidRecordPolicy, MergeConfig};
//!
//! let extract = ExtractConfig::new()
//!     .with_flat_invalid_records(InvalidRecordPolicy::Reject)
//!     .with_validate_entities(true);
//!
//! let merge = MergeConfig::new()
//!     .with_dedup(DedupPolicy::MessageId)
//!     .with_canonical_filename("messages.json");
//!
//! assert!(extract.validate_entities);
//! assert_eq!(merge.canonical_filename, "messages.json");
//! ```

use serde::{Deserialize, Serialize};

/// File name looked up inside every export folder.
pub const DEFAULT_CANONICAL_FILENAME: &str = "result.json";

/// How events are identified when merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupPolicy {
    /// Chat id and message id together (default).
    ///
    /// Messages with equal ids from different chats stay distinct.
    #[default]
    Composite,

    /// Message id alone.
    ///
    /// Only safe when every input belongs to the same chat.
    #[serde(alias = "id")]
    MessageId,
}

/// What to do with a flat-list record that has no usable date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    /// Drop the record and keep going (default). A missing id reads as 0.
    #[default]
    Skip,

    /// Fail the whole document, also when a record has no id.
    Reject,
}

/// Configuration for [`Extractor`](crate::Extractor).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Handling of broken flat-list records (default: skip)
    ///
    /// Wrapped exports always skip broken messages.
    pub flat_invalid_records: InvalidRecordPolicy,

    /// Drop entities whose span ends past the message text (default: false)
    pub validate_entities: bool,
}

impl ExtractConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that fails on broken flat records and
    /// validates entity spans.
    pub fn strict() -> Self {
        Self {
            flat_invalid_records: InvalidRecordPolicy::Reject,
            validate_entities: true,
        }
    }

    /// Sets the policy for broken flat-list records.
    #[must_use]
    pub fn with_flat_invalid_records(mut self, policy: InvalidRecordPolicy) -> Self {
        self.flat_invalid_records = policy;
        self
    }

    /// Sets whether out-of-range entities are dropped.
    #[must_use]
    pub fn with_validate_entities(mut self, validate: bool) -> Self {
        self.validate_entities = validate;
        self
    }
}

/// Configuration for [`Merger`](crate::Merger) and
/// [`FolderMerger`](crate::FolderMerger).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Deduplication key (default: composite)
    pub dedup: DedupPolicy,

    /// Export file looked up in each folder (default: `result.json`)
    pub canonical_filename: String,

    /// Parse folders concurrently when the `parallel` feature is on (default: true)
    pub parallel: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            dedup: DedupPolicy::Composite,
            canonical_filename: DEFAULT_CANONICAL_FILENAME.to_string(),
            parallel: true,
        }
    }
}

impl MergeConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deduplication policy.
    #[must_use]
    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }

    /// Sets the file name looked up in each export folder.
    #[must_use]
    pub fn with_canonical_filename(mut self, name: impl Into<String>) -> Self {
        self.canonical_filename = name.into();
        self
    }

    /// Enables or disables concurrent folder parsing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }
}
