use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::merge::MergedEntry;

pub const NON_ALPHABETIC_LABEL: &str = "0-9";

/// Leading-character group of a sort key. `NonAlphabetic` orders before every letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    NonAlphabetic,
    Letter(char),
}

impl Bucket {
    /// Bucket of a sort key, or `None` for an empty key.
    pub fn of(sort_key: &str) -> Option<Self> {
        let first = sort_key.chars().next()?;
        if first.is_ascii_alphabetic() {
            Some(Self::Letter(first.to_ascii_uppercase()))
        } else {
            Some(Self::NonAlphabetic)
        }
    }

    pub fn label(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonAlphabetic => f.write_str(NON_ALPHABETIC_LABEL),
            Self::Letter(letter) => write!(f, "{letter}"),
        }
    }
}

impl Serialize for Bucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Merged entries grouped by bucket, each group ordered by sort key (codepoint order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossarBuckets {
    buckets: BTreeMap<Bucket, Vec<MergedEntry>>,
}

impl GlossarBuckets {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = MergedEntry>,
    {
        let mut buckets: BTreeMap<Bucket, Vec<MergedEntry>> = BTreeMap::new();
        for entry in entries {
            let Some(bucket) = Bucket::of(&entry.sort_key) else {
                continue;
            };
            buckets.entry(bucket).or_default().push(entry);
        }
        for entries in buckets.values_mut() {
            entries.sort_by(|left, right| left.sort_key.cmp(&right.sort_key));
        }
        Self { buckets }
    }

    /// Entries of one bucket; an absent bucket reads as empty.
    pub fn get(&self, bucket: Bucket) -> &[MergedEntry] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[MergedEntry])> {
        self.buckets
            .iter()
            .map(|(bucket, entries)| (*bucket, entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn total_entries(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn counts(&self) -> BTreeMap<Bucket, usize> {
        self.buckets
            .iter()
            .map(|(bucket, entries)| (*bucket, entries.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{Bucket, GlossarBuckets};
    use crate::merge::MergedEntry;

    fn entry(sort_key: &str) -> MergedEntry {
        MergedEntry {
            sort_key: sort_key.to_string(),
            raw_text: format!("[[{sort_key}]]"),
            issues: vec![2000],
        }
    }

    #[test]
    fn bucket_of_sort_key() {
        assert_eq!(Bucket::of("Foo"), Some(Bucket::Letter('F')));
        assert_eq!(Bucket::of("9-imbariem"), Some(Bucket::NonAlphabetic));
        assert_eq!(Bucket::of("Ωmega"), Some(Bucket::NonAlphabetic));
        assert_eq!(Bucket::of(""), None);
    }

    #[test]
    fn non_alphabetic_sorts_before_letters() {
        assert!(Bucket::NonAlphabetic < Bucket::Letter('A'));
        assert!(Bucket::Letter('A') < Bucket::Letter('B'));
        assert_eq!(Bucket::NonAlphabetic.label(), "0-9");
        assert_eq!(Bucket::Letter('Q').label(), "Q");
    }

    #[test]
    fn entries_are_sorted_within_buckets() {
        let buckets = GlossarBuckets::from_entries(vec![
            entry("Foo"),
            entry("Bar"),
            entry("Fa"),
            entry("3-d"),
            entry("Baz"),
        ]);

        let order = buckets
            .iter()
            .map(|(bucket, entries)| {
                (
                    bucket.label(),
                    entries
                        .iter()
                        .map(|entry| entry.sort_key.as_str())
                        .collect::<Vec<_>>(),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            order,
            vec![
                ("0-9".to_string(), vec!["3-d"]),
                ("B".to_string(), vec!["Bar", "Baz"]),
                ("F".to_string(), vec!["Fa", "Foo"]),
            ]
        );
    }

    #[test]
    fn buckets_partition_all_entries() {
        let keys = ["Alpha", "Beta", "Ärger", "Zeta", "1x", "Aa", "Ab"];
        let buckets = GlossarBuckets::from_entries(keys.iter().map(|key| entry(key)));

        let mut seen = BTreeSet::new();
        for (bucket, entries) in buckets.iter() {
            for entry in entries {
                assert_eq!(Bucket::of(&entry.sort_key), Some(bucket));
                assert!(seen.insert(entry.sort_key.clone()), "duplicate entry");
            }
        }
        assert_eq!(seen.len(), keys.len());
        assert_eq!(buckets.total_entries(), keys.len());
    }

    #[test]
    fn missing_bucket_reads_as_empty() {
        let buckets = GlossarBuckets::from_entries(vec![entry("Foo")]);
        assert!(buckets.get(Bucket::Letter('Q')).is_empty());
        assert_eq!(buckets.get(Bucket::Letter('F')).len(), 1);
    }
}
