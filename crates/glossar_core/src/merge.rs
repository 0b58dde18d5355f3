use std::collections::HashMap;
use std::collections::hash_map::Entry;

use serde::Serialize;
use tracing::debug;

/// Canonical record of one glossary term across all issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedEntry {
    pub sort_key: String,
    /// Longest markup variant seen for this key; the first one wins on equal length.
    pub raw_text: String,
    /// Issues in encounter order; an issue repeats when it lists the term twice.
    pub issues: Vec<u32>,
}

impl MergedEntry {
    pub fn count(&self) -> usize {
        self.issues.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Created,
    Appended,
    /// Appended and the stored markup was replaced by a longer variant.
    Upgraded,
}

/// Folds `(sort_key, raw_text, issue)` triples into one entry per sort key.
#[derive(Debug, Default)]
pub struct EntryMerger {
    entries: HashMap<String, MergedEntry>,
    max_issue: u32,
}

impl EntryMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an issue block that contributed at least one entry.
    pub fn record_issue(&mut self, issue: u32) {
        self.max_issue = self.max_issue.max(issue);
    }

    pub fn merge(&mut self, sort_key: String, raw_text: &str, issue: u32) -> MergeOutcome {
        let entry = match self.entries.entry(sort_key) {
            Entry::Vacant(slot) => {
                let sort_key = slot.key().clone();
                slot.insert(MergedEntry {
                    sort_key,
                    raw_text: raw_text.to_string(),
                    issues: vec![issue],
                });
                return MergeOutcome::Created;
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        entry.issues.push(issue);
        if raw_text.chars().count() > entry.raw_text.chars().count() {
            debug!(from = %entry.raw_text, to = raw_text, "update entry");
            entry.raw_text = raw_text.to_string();
            return MergeOutcome::Upgraded;
        }
        MergeOutcome::Appended
    }

    pub fn max_issue(&self) -> u32 {
        self.max_issue
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn finish(self) -> MergedGlossary {
        MergedGlossary {
            entries: self.entries.into_values().collect(),
            max_issue: self.max_issue,
        }
    }
}

/// Frozen result of the merge phase. Entry order is unspecified until bucketing.
#[derive(Debug, Clone, Default)]
pub struct MergedGlossary {
    pub entries: Vec<MergedEntry>,
    /// Highest issue with at least one entry, `0` when nothing was merged.
    pub max_issue: u32,
}

#[cfg(test)]
mod tests {
    use super::{EntryMerger, MergeOutcome};

    #[test]
    fn duplicate_keys_aggregate_issues_in_order() {
        let mut merger = EntryMerger::new();
        assert_eq!(
            merger.merge("Foo".to_string(), "[[Foo]]", 1971),
            MergeOutcome::Created
        );
        assert_eq!(
            merger.merge("Foo".to_string(), "[[Foo]]", 1980),
            MergeOutcome::Appended
        );

        let merged = merger.finish();
        assert_eq!(merged.entries.len(), 1);
        assert_eq!(merged.entries[0].issues, vec![1971, 1980]);
        assert_eq!(merged.entries[0].count(), 2);
    }

    #[test]
    fn longest_raw_text_wins() {
        let mut merger = EntryMerger::new();
        merger.merge("Foo".to_string(), "[[F]]", 2000);
        assert_eq!(
            merger.merge("Foo".to_string(), "[[Foo|Foo]]", 2001),
            MergeOutcome::Upgraded
        );
        merger.merge("Foo".to_string(), "Foo", 2002);

        let merged = merger.finish();
        assert_eq!(merged.entries[0].raw_text, "[[Foo|Foo]]");
        assert_eq!(merged.entries[0].issues, vec![2000, 2001, 2002]);
    }

    #[test]
    fn equal_length_keeps_first_seen() {
        let mut merger = EntryMerger::new();
        merger.merge("Ab".to_string(), "[[Ab]]", 2000);
        assert_eq!(
            merger.merge("Ab".to_string(), "[[aB]]", 2001),
            MergeOutcome::Appended
        );
        assert_eq!(merger.finish().entries[0].raw_text, "[[Ab]]");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut merger = EntryMerger::new();
        merger.merge("Aerger".to_string(), "Ärger", 2000);
        assert_eq!(
            merger.merge("Aerger".to_string(), "Aerge", 2001),
            MergeOutcome::Appended
        );
        assert_eq!(merger.finish().entries[0].raw_text, "Ärger");
    }

    #[test]
    fn max_issue_tracks_recorded_blocks_only() {
        let mut merger = EntryMerger::new();
        assert_eq!(merger.max_issue(), 0);
        merger.record_issue(2010);
        merger.record_issue(2000);
        merger.merge("Foo".to_string(), "[[Foo]]", 2500);
        assert_eq!(merger.max_issue(), 2010);
        assert_eq!(merger.finish().max_issue, 2010);
    }
}
