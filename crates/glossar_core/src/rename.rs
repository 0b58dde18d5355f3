use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::visible::DisplayTextResolver;

/// Manual corrections: legacy visible text (no markup) to the corrected entry markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RenameTable {
    entries: BTreeMap<String, String>,
}

impl RenameTable {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn get(&self, visible_text: &str) -> Option<&str> {
        self.entries.get(visible_text).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RenameTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub raw_text: String,
    pub visible_text: String,
}

pub struct RenameResolver<'a> {
    table: &'a RenameTable,
    display: &'a DisplayTextResolver,
}

impl<'a> RenameResolver<'a> {
    pub fn new(table: &'a RenameTable, display: &'a DisplayTextResolver) -> Self {
        Self { table, display }
    }

    /// Exact-match lookup. The replacement's visible text is derived from the
    /// replacement markup, never copied from the key.
    pub fn resolve(&self, visible_text: &str) -> Option<Correction> {
        let replacement = self.table.get(visible_text)?;
        Some(Correction {
            raw_text: replacement.to_string(),
            visible_text: self.display.resolve(replacement),
        })
    }
}
