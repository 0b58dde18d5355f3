use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::bucket::{Bucket, GlossarBuckets};
use crate::extract::{RawEntry, issue_blocks};
use crate::merge::{EntryMerger, MergeOutcome};
use crate::normalize::sort_key;
use crate::rename::{RenameResolver, RenameTable};
use crate::render::{DEFAULT_PAGE_PREFIX, RenderedPage, render_pages};
use crate::visible::DisplayTextResolver;

/// Markup of one chronological source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePage {
    pub identifier: String,
    pub content: String,
}

impl SourcePage {
    pub fn new(identifier: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub page_prefix: String,
    pub display: DisplayTextResolver,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            page_prefix: DEFAULT_PAGE_PREFIX.to_string(),
            display: DisplayTextResolver::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub sources: usize,
    pub entries: usize,
    pub renamed: usize,
    pub dropped: usize,
    pub upgraded: usize,
    pub merged: usize,
    pub by_bucket: BTreeMap<Bucket, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlossaryRun {
    pub max_issue: u32,
    pub stats: RunStats,
    #[serde(skip)]
    pub buckets: GlossarBuckets,
    pub pages: Vec<RenderedPage>,
}

impl GlossaryRun {
    pub fn page(&self, page_name: &str) -> Option<&RenderedPage> {
        self.pages.iter().find(|page| page.page_name == page_name)
    }
}

/// Run extraction, renaming, merging, bucketing and rendering over all sources.
///
/// Sources are folded in identifier order, so the order in which the caller
/// supplies them never changes the output.
pub fn build_glossary(
    sources: &[SourcePage],
    rename: &RenameTable,
    options: &PipelineOptions,
) -> GlossaryRun {
    let mut ordered = sources.iter().collect::<Vec<_>>();
    ordered.sort_by(|left, right| {
        left.identifier
            .cmp(&right.identifier)
            .then_with(|| left.content.cmp(&right.content))
    });

    let renamer = RenameResolver::new(rename, &options.display);
    let mut merger = EntryMerger::new();
    let mut stats = RunStats {
        sources: ordered.len(),
        ..RunStats::default()
    };

    for source in ordered {
        debug!(source = %source.identifier, "extracting entries");
        for block in issue_blocks(&source.content) {
            let mut contributed = false;
            for raw in block.entries() {
                contributed = true;
                stats.entries += 1;
                fold_entry(raw, &options.display, &renamer, &mut merger, &mut stats);
            }
            if contributed {
                merger.record_issue(block.issue);
            }
        }
    }

    info!("max issue: {}", merger.max_issue());
    info!("glossary entries: {}", stats.entries);

    let merged = merger.finish();
    let max_issue = merged.max_issue;
    let buckets = GlossarBuckets::from_entries(merged.entries);
    for (bucket, entries) in buckets.iter() {
        info!("sorted glossary entries '{bucket}': {}", entries.len());
    }
    stats.merged = buckets.total_entries();
    stats.by_bucket = buckets.counts();
    info!("total sorted glossary entries: {}", stats.merged);

    let pages = render_pages(&buckets, max_issue, &options.page_prefix);
    GlossaryRun {
        max_issue,
        stats,
        buckets,
        pages,
    }
}

fn fold_entry(
    raw: RawEntry,
    display: &DisplayTextResolver,
    renamer: &RenameResolver<'_>,
    merger: &mut EntryMerger,
    stats: &mut RunStats,
) {
    let mut raw_text = raw.raw_text;
    let mut visible = display.resolve(&raw_text);

    if let Some(correction) = renamer.resolve(&visible) {
        info!(
            "update entry '{}' [PR{}]: {}",
            raw_text, raw.issue, correction.raw_text
        );
        raw_text = correction.raw_text;
        visible = correction.visible_text;
        stats.renamed += 1;
    }

    if visible.is_empty() {
        stats.dropped += 1;
        return;
    }
    let key = sort_key(&visible);
    if key.is_empty() {
        stats.dropped += 1;
        return;
    }

    if merger.merge(key, &raw_text, raw.issue) == MergeOutcome::Upgraded {
        stats.upgraded += 1;
    }
}
