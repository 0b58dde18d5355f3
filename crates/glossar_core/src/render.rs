use serde::Serialize;

use crate::bucket::{Bucket, GlossarBuckets};
use crate::merge::MergedEntry;

pub const DEFAULT_PAGE_PREFIX: &str = "Perry Rhodan-Glossar";

const POSTAMBLE: &str = "\n[[Kategorie:Beilage]]\n\n{{PPDefaultsort}}\n";

/// One alphabetical output page and the letter buckets it shows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGroup {
    pub suffix: &'static str,
    pub buckets: &'static [Bucket],
}

pub const PAGE_GROUPS: &[PageGroup] = &[
    PageGroup {
        suffix: "A",
        buckets: &[Bucket::NonAlphabetic, Bucket::Letter('A')],
    },
    PageGroup {
        suffix: "B",
        buckets: &[Bucket::Letter('B')],
    },
    PageGroup {
        suffix: "C",
        buckets: &[Bucket::Letter('C')],
    },
    PageGroup {
        suffix: "D",
        buckets: &[Bucket::Letter('D')],
    },
    PageGroup {
        suffix: "E",
        buckets: &[Bucket::Letter('E')],
    },
    PageGroup {
        suffix: "F",
        buckets: &[Bucket::Letter('F')],
    },
    PageGroup {
        suffix: "G",
        buckets: &[Bucket::Letter('G')],
    },
    PageGroup {
        suffix: "H",
        buckets: &[Bucket::Letter('H')],
    },
    PageGroup {
        suffix: "I-J",
        buckets: &[Bucket::Letter('I'), Bucket::Letter('J')],
    },
    PageGroup {
        suffix: "K",
        buckets: &[Bucket::Letter('K')],
    },
    PageGroup {
        suffix: "L",
        buckets: &[Bucket::Letter('L')],
    },
    PageGroup {
        suffix: "M",
        buckets: &[Bucket::Letter('M')],
    },
    PageGroup {
        suffix: "N",
        buckets: &[Bucket::Letter('N')],
    },
    PageGroup {
        suffix: "O",
        buckets: &[Bucket::Letter('O')],
    },
    PageGroup {
        suffix: "P-Q",
        buckets: &[Bucket::Letter('P'), Bucket::Letter('Q')],
    },
    PageGroup {
        suffix: "R",
        buckets: &[Bucket::Letter('R')],
    },
    PageGroup {
        suffix: "S",
        buckets: &[Bucket::Letter('S')],
    },
    PageGroup {
        suffix: "T",
        buckets: &[Bucket::Letter('T')],
    },
    PageGroup {
        suffix: "U-W",
        buckets: &[Bucket::Letter('U'), Bucket::Letter('V'), Bucket::Letter('W')],
    },
    PageGroup {
        suffix: "X-Z",
        buckets: &[Bucket::Letter('X'), Bucket::Letter('Y'), Bucket::Letter('Z')],
    },
];

impl PageGroup {
    pub fn page_name(&self, page_prefix: &str) -> String {
        format!("{page_prefix} {}", self.suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPage {
    pub page_name: String,
    pub body: String,
}

impl RenderedPage {
    /// File name used for this page on disk: spaces become underscores.
    pub fn file_name(&self) -> String {
        page_file_name(&self.page_name)
    }
}

pub fn page_file_name(page_name: &str) -> String {
    format!("{}.wiki", page_name.replace(' ', "_"))
}

pub fn issue_reference(issue: u32) -> String {
    format!("[[Quelle:PR{issue}|PR&nbsp;{issue}]]")
}

pub fn preamble(max_issue: u32) -> String {
    format!(
        "{{{{Navigationsleiste Glossar alphabetisch}}}}\n\nStand: {}\n\n",
        issue_reference(max_issue)
    )
}

pub fn render_entry_line(entry: &MergedEntry) -> String {
    let references = entry
        .issues
        .iter()
        .map(|issue| issue_reference(*issue))
        .collect::<Vec<_>>()
        .join(", ");
    format!("* {} ({references})\n", entry.raw_text)
}

pub fn render_letter_block(bucket: Bucket, entries: &[MergedEntry]) -> String {
    let mut out = format!("== {bucket} ==\n\n<div style=\"column-width:30em\">\n");
    for entry in entries {
        out.push_str(&render_entry_line(entry));
    }
    out.push_str("</div>\n");
    out.push_str(&format!(
        "''Anzahl der Einträge: '''{}''' ''\n",
        entries.len()
    ));
    out
}

/// Assemble every page of [`PAGE_GROUPS`]. Buckets without entries render as
/// empty letter blocks.
pub fn render_pages(buckets: &GlossarBuckets, max_issue: u32, page_prefix: &str) -> Vec<RenderedPage> {
    let preamble = preamble(max_issue);
    PAGE_GROUPS
        .iter()
        .map(|group| {
            let blocks = group
                .buckets
                .iter()
                .map(|bucket| render_letter_block(*bucket, buckets.get(*bucket)))
                .collect::<Vec<_>>()
                .join("\n");
            RenderedPage {
                page_name: group.page_name(page_prefix),
                body: format!("{preamble}{blocks}{POSTAMBLE}"),
            }
        })
        .collect()
}
