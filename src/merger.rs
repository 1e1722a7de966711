//! Combining event sequences from several exports.
//!
//! Events are keyed by [`EventKey`]; when a key repeats, the occurrence
//! seen last (later sequence, or later position in the same sequence)
//! wins. The result is sorted by date, with ties ordered by key.
//!
//! # Example
//!
//! ```rust
//! use chatmerge::{Event, merge_event_sequences};
//! use chrono::{TimeZone, Utc};
//!
//! let day = |d| Utc.with_ymd_and_hms(2026, 1, d, 0, 0, 0).unwrap();
//!
//! let first = vec![Event::new(1, 100, day(1)).with_text("old")];
//! let second = vec![
//!     Event::new(1, 100, day(2)).with_text("new"),
//!     Event::new(1, 200, day(1)),
//! ];
//!
//! let merged = merge_event_sequences(vec![first, second]);
//! assert_eq!(merged.len(), 2);
//! assert_eq!(merged[1].text, "new");
//! ```

use std::collections::BTreeMap;

use crate::config::{DedupPolicy, MergeConfig};
use crate::event::{Event, EventKey, MergedEvents};

/// Deduplicates and sorts events from several sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct Merger {
    dedup: DedupPolicy,
}

impl Merger {
    /// Creates a merger using the composite `(chat_id, id)` key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a merger with an explicit key policy.
    pub fn with_policy(dedup: DedupPolicy) -> Self {
        Self { dedup }
    }

    pub fn from_config(config: &MergeConfig) -> Self {
        Self::with_policy(config.dedup)
    }

    pub fn policy(&self) -> DedupPolicy {
        self.dedup
    }

    /// Merges `sequences` in the order given.
    pub fn merge<I, S>(&self, sequences: I) -> MergedEvents
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = Event>,
    {
        self.merge_with_stats(sequences).0
    }

    /// Merges `sequences` and reports how many events were folded together.
    pub fn merge_with_stats<I, S>(&self, sequences: I) -> (MergedEvents, MergeStats)
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = Event>,
    {
        let mut by_key: BTreeMap<EventKey, Event> = BTreeMap::new();
        let mut input_count = 0usize;

        for sequence in sequences {
            for event in sequence {
                input_count += 1;
                by_key.insert(event.key(self.dedup), event);
            }
        }

        // Drained in key order; the stable sort keeps it for equal dates.
        let mut events: Vec<Event> = by_key.into_values().collect();
        events.sort_by_key(|event| event.date);

        let stats = MergeStats::new(input_count, events.len());
        tracing::debug!(
            policy = ?self.dedup,
            input = stats.input_count,
            unique = stats.unique_count,
            "merged event sequences"
        );
        (MergedEvents::new(events), stats)
    }
}

/// Counts of a merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeStats {
    /// Events across all input sequences.
    pub input_count: usize,
    /// Events left after deduplication.
    pub unique_count: usize,
}

impl MergeStats {
    pub fn new(input_count: usize, unique_count: usize) -> Self {
        Self {
            input_count,
            unique_count,
        }
    }

    /// Number of events replaced by a later duplicate.
    pub fn duplicates(&self) -> usize {
        self.input_count.saturating_sub(self.unique_count)
    }

    /// Share of input events that were duplicates, in percent.
    pub fn duplicate_ratio(&self) -> f64 {
        if self.input_count == 0 {
            return 0.0;
        }
        self.duplicates() as f64 / self.input_count as f64 * 100.0
    }
}

/// Merges event sequences with the composite key and returns the sorted
/// events.
pub fn merge_event_sequences<I, S>(sequences: I) -> Vec<Event>
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = Event>,
{
    Merger::new().merge(sequences).into_events()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, d, 0, 0, 0).unwrap()
    }

    fn event(id: i64, chat_id: i64, d: u32, text: &str) -> Event {
        Event::new(id, chat_id, day(d)).with_text(text)
    }

    #[test]
    fn test_merge_removes_duplicates() {
        let first = vec![event(1, 100, 1, "First"), event(2, 100, 2, "Second")];
        let second = vec![event(1, 100, 1, "First"), event(3, 100, 3, "Third")];

        let merged = merge_event_sequences(vec![first, second]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_composite_key_keeps_other_chats() {
        let merged = merge_event_sequences(vec![
            vec![event(1, 100, 1, "A")],
            vec![event(1, 200, 1, "B")],
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_message_id_policy_collapses_chats() {
        let merger = Merger::with_policy(DedupPolicy::MessageId);
        let merged = merger.merge(vec![vec![event(1, 100, 1, "A")], vec![event(1, 200, 1, "B")]]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.events[0].text, "B");
    }

    #[test]
    fn test_last_write_wins_across_sequences() {
        let merged = merge_event_sequences(vec![
            vec![event(1, 100, 1, "old")],
            vec![event(1, 100, 2, "new")],
        ]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "new");
        assert_eq!(merged[0].date, day(2));
    }

    #[test]
    fn test_last_write_wins_within_sequence() {
        let merged = merge_event_sequences(vec![vec![
            event(1, 100, 1, "old"),
            event(1, 100, 1, "new"),
        ]]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text, "new");
    }

    #[test]
    fn test_chronological_order() {
        let merged = merge_event_sequences(vec![
            vec![event(3, 1, 3, "T3"), event(1, 1, 1, "T1")],
            vec![event(2, 1, 2, "T2")],
        ]);
        let texts: Vec<&str> = merged.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["T1", "T2", "T3"]);
    }

    #[test]
    fn test_ties_broken_by_key() {
        let merged = merge_event_sequences(vec![
            vec![event(5, 2, 1, "c"), event(9, 1, 1, "b")],
            vec![event(1, 1, 1, "a")],
        ]);
        let keys: Vec<(i64, i64)> = merged.iter().map(|e| (e.chat_id, e.id)).collect();
        assert_eq!(keys, vec![(1, 1), (1, 9), (2, 5)]);
    }

    #[test]
    fn test_merge_empty() {
        let merged = merge_event_sequences(Vec::<Vec<Event>>::new());
        assert!(merged.is_empty());

        let merged = merge_event_sequences(vec![Vec::new(), Vec::new()]);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_with_stats() {
        let (merged, stats) = Merger::new().merge_with_stats([
            vec![event(1, 1, 1, "a"), event(2, 1, 2, "b")],
            vec![event(1, 1, 1, "a"), event(2, 1, 2, "b")],
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(stats.input_count, 4);
        assert_eq!(stats.unique_count, 2);
        assert_eq!(stats.duplicates(), 2);
        assert!((stats.duplicate_ratio() - 50.0).abs() < 0.01);
    }

    #[test]
    fn test_stats_empty_ratio() {
        assert_eq!(MergeStats::default().duplicate_ratio(), 0.0);
    }

    #[test]
    fn test_from_config() {
        let merger = Merger::from_config(&MergeConfig::new().with_dedup(DedupPolicy::MessageId));
        assert_eq!(merger.policy(), DedupPolicy::MessageId);
        assert_eq!(Merger::new().policy(), DedupPolicy::Composite);
    }
}
