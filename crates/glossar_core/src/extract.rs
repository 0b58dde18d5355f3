use serde::Serialize;

/// Table-row marker that opens a per-issue block on a chronological glossary page.
pub const ISSUE_MARKER: &str = "colspan=\"3\" | [[Quelle:PR";

const ISSUE_DIGITS: usize = 4;
const ROW_SEPARATOR: &str = "|-";
const TABLE_END: &str = "|}";
const BULLET_PREFIX: &str = "* ";

/// Characters stripped from both ends of an entry line.
pub(crate) const TRIM_CHARS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntry {
    pub issue: u32,
    pub raw_text: String,
}

/// One `|-`-delimited table section attached to a single issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueBlock<'a> {
    pub issue: u32,
    pub body: &'a str,
}

impl<'a> IssueBlock<'a> {
    /// Non-empty bullet entries of this block, in encounter order.
    pub fn entries(self) -> impl Iterator<Item = RawEntry> + 'a {
        let issue = self.issue;
        bullet_lines(self.body).map(move |text| RawEntry {
            issue,
            raw_text: text.to_string(),
        })
    }
}

/// Iterator over the issue blocks of one page, see [`issue_blocks`].
#[derive(Debug, Clone)]
pub struct IssueBlocks<'a> {
    content: &'a str,
    cursor: usize,
}

impl<'a> Iterator for IssueBlocks<'a> {
    type Item = IssueBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = self.content[self.cursor..].find(ISSUE_MARKER) {
            let start = self.cursor + offset;
            match parse_block(self.content, start) {
                Some((block, end)) => {
                    self.cursor = end;
                    return Some(block);
                }
                // The marker starts with an ASCII byte, so `start + 1` is a char boundary.
                None => self.cursor = start + 1,
            }
        }
        self.cursor = self.content.len();
        None
    }
}

/// Scan a page for issue blocks. Blocks without a closing `|-` or `|}` are skipped.
pub fn issue_blocks(content: &str) -> IssueBlocks<'_> {
    IssueBlocks { content, cursor: 0 }
}

/// All raw entries of one page, flattened across its issue blocks.
pub fn extract_entries(content: &str) -> impl Iterator<Item = RawEntry> + '_ {
    issue_blocks(content).flat_map(IssueBlock::entries)
}

fn parse_block(content: &str, marker_start: usize) -> Option<(IssueBlock<'_>, usize)> {
    let digits_start = marker_start + ISSUE_MARKER.len();
    let digits = content.get(digits_start..digits_start + ISSUE_DIGITS)?;
    if !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    let issue = digits.parse::<u32>().ok()?;

    let after_digits = digits_start + ISSUE_DIGITS;
    let body_start =
        after_digits + content[after_digits..].find(ROW_SEPARATOR)? + ROW_SEPARATOR.len();

    let rest = &content[body_start..];
    let close = match (rest.find(ROW_SEPARATOR), rest.find(TABLE_END)) {
        (Some(separator), Some(end)) => separator.min(end),
        (Some(separator), None) => separator,
        (None, Some(end)) => end,
        (None, None) => return None,
    };

    let block = IssueBlock {
        issue,
        body: &rest[..close],
    };
    // Both closing markers are two bytes long.
    Some((block, body_start + close + ROW_SEPARATOR.len()))
}

fn bullet_lines(body: &str) -> impl Iterator<Item = &str> {
    body.split('\n').filter_map(|line| {
        let text = line.strip_prefix(BULLET_PREFIX)?.trim_matches(TRIM_CHARS);
        if text.is_empty() { None } else { Some(text) }
    })
}
