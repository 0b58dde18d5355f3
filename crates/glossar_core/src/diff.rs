use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use similar::{ChangeTag, TextDiff};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::runtime::write_text_file;

const CONTEXT_RADIUS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    /// No current version to compare against.
    Missing,
    Unchanged,
    Changed,
}

impl PageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Unchanged => "unchanged",
            Self::Changed => "changed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDiff {
    pub file_name: String,
    pub status: PageStatus,
    pub added: usize,
    pub removed: usize,
    pub diff_path: Option<PathBuf>,
}

/// Compare every generated page in `output_dir` with its counterpart in
/// `current_dir` and write unified diffs of changed pages into `diff_dir`.
pub fn diff_pages(output_dir: &Path, current_dir: &Path, diff_dir: &Path) -> Result<Vec<PageDiff>> {
    if !output_dir.is_dir() {
        bail!(
            "output directory {} does not exist; run `glossar create` first",
            output_dir.display()
        );
    }

    let mut out = Vec::new();
    for entry in WalkDir::new(output_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("failed to walk {}", output_dir.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().and_then(|ext| ext.to_str()) != Some("wiki")
        {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        let generated = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let diff_path = diff_dir.join(format!("{file_name}.diff"));

        let current_path = current_dir.join(&file_name);
        if !current_path.exists() {
            debug!("no current version of {file_name}");
            remove_stale(&diff_path)?;
            out.push(PageDiff {
                file_name,
                status: PageStatus::Missing,
                added: 0,
                removed: 0,
                diff_path: None,
            });
            continue;
        }
        let current = fs::read_to_string(&current_path)
            .with_context(|| format!("failed to read {}", current_path.display()))?;

        out.push(compare_page(file_name, &current, &generated, &diff_path)?);
    }
    Ok(out)
}

fn compare_page(
    file_name: String,
    current: &str,
    generated: &str,
    diff_path: &Path,
) -> Result<PageDiff> {
    if current == generated {
        remove_stale(diff_path)?;
        return Ok(PageDiff {
            file_name,
            status: PageStatus::Unchanged,
            added: 0,
            removed: 0,
            diff_path: None,
        });
    }

    let diff = TextDiff::from_lines(current, generated);
    let (mut added, mut removed) = (0, 0);
    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => added += 1,
            ChangeTag::Delete => removed += 1,
            ChangeTag::Equal => {}
        }
    }
    let rendered = diff
        .unified_diff()
        .context_radius(CONTEXT_RADIUS)
        .header(&format!("current/{file_name}"), &format!("output/{file_name}"))
        .to_string();
    write_text_file(diff_path, &rendered, true)?;
    info!("{file_name}: +{added} -{removed}");

    Ok(PageDiff {
        file_name,
        status: PageStatus::Changed,
        added,
        removed,
        diff_path: Some(diff_path.to_path_buf()),
    })
}

fn remove_stale(diff_path: &Path) -> Result<()> {
    if diff_path.exists() {
        fs::remove_file(diff_path)
            .with_context(|| format!("failed to remove {}", diff_path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::{PageStatus, diff_pages};

    #[test]
    fn reports_missing_unchanged_and_changed_pages() {
        let temp = tempdir().expect("tempdir");
        let output = temp.path().join("output");
        let current = temp.path().join("current");
        let diffs = temp.path().join("diff");
        fs::create_dir_all(&output).expect("output dir");
        fs::create_dir_all(&current).expect("current dir");

        fs::write(output.join("G_A.wiki"), "== A ==\n* [[Alpha]]\n").expect("write");
        fs::write(output.join("G_B.wiki"), "== B ==\n* [[Beta]]\n* [[Bor]]\n").expect("write");
        fs::write(output.join("G_C.wiki"), "== C ==\n").expect("write");
        fs::write(output.join("readme.txt"), "not a page").expect("write");
        fs::write(current.join("G_A.wiki"), "== A ==\n* [[Alpha]]\n").expect("write");
        fs::write(current.join("G_B.wiki"), "== B ==\n* [[Beta]]\n* [[Bar]]\n").expect("write");

        let report = diff_pages(&output, &current, &diffs).expect("diff");
        let statuses = report
            .iter()
            .map(|page| (page.file_name.as_str(), page.status))
            .collect::<Vec<_>>();
        assert_eq!(
            statuses,
            vec![
                ("G_A.wiki", PageStatus::Unchanged),
                ("G_B.wiki", PageStatus::Changed),
                ("G_C.wiki", PageStatus::Missing),
            ]
        );

        let changed = &report[1];
        assert_eq!((changed.added, changed.removed), (1, 1));
        let diff_path = changed.diff_path.as_ref().expect("diff path");
        assert_eq!(diff_path, &diffs.join("G_B.wiki.diff"));
        let text = fs::read_to_string(diff_path).expect("read diff");
        assert!(text.contains("--- current/G_B.wiki"));
        assert!(text.contains("+++ output/G_B.wiki"));
        assert!(text.contains("-* [[Bar]]"));
        assert!(text.contains("+* [[Bor]]"));
        assert!(!diffs.join("G_A.wiki.diff").exists());
    }

    #[test]
    fn unchanged_page_clears_stale_diff() {
        let temp = tempdir().expect("tempdir");
        let output = temp.path().join("output");
        let current = temp.path().join("current");
        let diffs = temp.path().join("diff");
        for dir in [&output, &current, &diffs] {
            fs::create_dir_all(dir).expect("create dir");
        }
        fs::write(output.join("P.wiki"), "same\n").expect("write");
        fs::write(current.join("P.wiki"), "same\n").expect("write");
        fs::write(diffs.join("P.wiki.diff"), "old diff").expect("write");

        let report = diff_pages(&output, &current, &diffs).expect("diff");
        assert_eq!(report[0].status, PageStatus::Unchanged);
        assert!(!diffs.join("P.wiki.diff").exists());
    }

    #[test]
    fn missing_output_dir_is_an_error() {
        let temp = tempdir().expect("tempdir");
        let error = diff_pages(
            &temp.path().join("output"),
            temp.path(),
            &temp.path().join("diff"),
        )
        .expect_err("must fail");
        assert!(error.to_string().contains("run `glossar create` first"));
    }
}
