use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::pipeline::SourcePage;

/// Load every source page below `sources_dir`, in file name order.
///
/// `*.json` files hold a MediaWiki query response (or a single page object);
/// `*.wiki` and `*.txt` files hold raw markup named after their file stem.
pub fn load_sources(sources_dir: &Path) -> Result<Vec<SourcePage>> {
    if !sources_dir.is_dir() {
        bail!(
            "sources directory {} does not exist; run `glossar prepare` and place the chronological pages there",
            sources_dir.display()
        );
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(sources_dir)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("failed to walk {}", sources_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => out.extend(load_json_source(path)?),
            Some("wiki") | Some("txt") => out.push(load_raw_source(path)?),
            _ => debug!(path = %path.display(), "ignoring non-source file"),
        }
    }
    Ok(out)
}

fn load_raw_source(path: &Path) -> Result<SourcePage> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let identifier = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid source file name: {}", path.display()))?
        .replace('_', " ");
    Ok(SourcePage {
        identifier,
        content,
    })
}

fn load_json_source(path: &Path) -> Result<Vec<SourcePage>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let payload: Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let pages = pages_from_payload(&payload)
        .with_context(|| format!("invalid MediaWiki response shape in {}", path.display()))?;
    Ok(pages)
}

pub fn pages_from_payload(payload: &Value) -> Result<Vec<SourcePage>> {
    let pages = match payload.get("query").and_then(|value| value.get("pages")) {
        Some(Value::Array(pages)) => pages.iter().collect::<Vec<_>>(),
        Some(Value::Object(pages)) => pages.values().collect::<Vec<_>>(),
        Some(_) => bail!("query.pages must be an object or an array"),
        None if payload.get("revisions").is_some() || payload.get("*").is_some() => {
            vec![payload]
        }
        None => bail!("expected query.pages or a page object"),
    };

    let mut out = Vec::with_capacity(pages.len());
    for page in pages {
        let Some(title) = page.get("title").and_then(Value::as_str) else {
            bail!("page without title");
        };
        if page.get("missing").is_some() {
            warn!("source page '{title}' is missing; skipping");
            continue;
        }
        let Some(content) = page_text(page) else {
            warn!("source page '{title}' has no revision content; skipping");
            continue;
        };
        out.push(SourcePage {
            identifier: title.to_string(),
            content: content.to_string(),
        });
    }
    Ok(out)
}

fn page_text(page: &Value) -> Option<&str> {
    let revision = page
        .get("revisions")
        .and_then(Value::as_array)
        .and_then(|revisions| revisions.first());
    let Some(revision) = revision else {
        return page.get("*").and_then(Value::as_str);
    };
    revision.get("*").and_then(Value::as_str).or_else(|| {
        revision
            .get("slots")
            .and_then(|value| value.get("main"))
            .and_then(|value| value.get("content"))
            .and_then(Value::as_str)
    })
}
