use std::borrow::Cow;

use html_escape::decode_html_entities;

use crate::extract::TRIM_CHARS;

pub const DEFAULT_TEMPLATE_NAMES: &[&str] = &["WP"];

const LINK_OPEN: &str = "[[";
const CLOSERS: [&str; 2] = ["}}", "]]"];

/// Turns an entry's markup into the text a reader sees on the rendered page.
///
/// Only the leftmost `[[target|label]]` or `{{NAME|target|label}}` wrapper is
/// replaced by its label (or its target when no label is given). Later links in
/// the same entry stay as they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTextResolver {
    template_openers: Vec<String>,
}

impl Default for DisplayTextResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE_NAMES)
    }
}

impl DisplayTextResolver {
    pub fn new<S: AsRef<str>>(template_names: &[S]) -> Self {
        let template_openers = template_names
            .iter()
            .map(|name| name.as_ref().trim())
            .filter(|name| !name.is_empty())
            .map(|name| format!("{{{{{name}|"))
            .collect();
        Self { template_openers }
    }

    pub fn resolve(&self, raw_text: &str) -> String {
        let stripped = self.strip_first_wrapper(raw_text);
        let decoded = decode_entities(&stripped);
        decoded.trim_matches(TRIM_CHARS).to_string()
    }

    fn strip_first_wrapper<'a>(&self, text: &'a str) -> Cow<'a, str> {
        for (start, _) in text.char_indices() {
            let Some(opener_len) = self.opener_at(&text[start..]) else {
                continue;
            };
            if let Some((label_start, label_end, end)) = match_wrapper(text, start + opener_len) {
                let mut out = String::with_capacity(text.len());
                out.push_str(&text[..start]);
                out.push_str(&text[label_start..label_end]);
                out.push_str(&text[end..]);
                return Cow::Owned(out);
            }
        }
        Cow::Borrowed(text)
    }

    fn opener_at(&self, rest: &str) -> Option<usize> {
        if rest.starts_with(LINK_OPEN) {
            return Some(LINK_OPEN.len());
        }
        self.template_openers
            .iter()
            .find(|opener| rest.starts_with(opener.as_str()))
            .map(String::len)
    }
}

/// Locate the label of a wrapper whose inner text begins at `inner_start`.
///
/// The target part is the longest run of non-`]` text ending in a pipe for which
/// a closing `]]` or `}}` still follows; without such a pipe the whole inner text
/// up to the first closer is the label. Returns `(label_start, label_end, end)`.
fn match_wrapper(text: &str, inner_start: usize) -> Option<(usize, usize, usize)> {
    let inner = &text[inner_start..];
    let run = &inner[..inner.find(']').unwrap_or(inner.len())];

    for (pipe, _) in run.rmatch_indices('|') {
        if pipe == 0 {
            continue;
        }
        let label_start = inner_start + pipe + 1;
        if let Some(close) = find_closer(text, label_start) {
            return Some((label_start, close, close + 2));
        }
    }

    find_closer(text, inner_start).map(|close| (inner_start, close, close + 2))
}

fn find_closer(text: &str, from: usize) -> Option<usize> {
    CLOSERS
        .iter()
        .filter_map(|closer| text[from..].find(closer))
        .min()
        .map(|offset| from + offset)
}

/// Decode HTML character references, named and numeric, in a single pass.
///
/// `&nbsp;` becomes U+00A0, which is not stripped by the surrounding trim.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    decode_html_entities(text)
}
