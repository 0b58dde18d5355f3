use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::config::{GlossarConfig, StepDirs};
use crate::pipeline::{GlossaryRun, build_glossary};
use crate::render::RenderedPage;
use crate::runtime::write_text_file;
use crate::sources::load_sources;

#[derive(Debug, Clone, Serialize)]
pub struct CreateReport {
    #[serde(flatten)]
    pub run: GlossaryRun,
    pub written: Vec<PathBuf>,
}

/// Load the sources, build the glossary and write every page into the output step directory.
pub fn create_glossary(config: &GlossarConfig, steps: &StepDirs) -> Result<CreateReport> {
    let sources = load_sources(&steps.sources)?;
    info!("loaded {} source pages", sources.len());

    let run = build_glossary(&sources, &config.rename, &config.pipeline_options());
    let written = write_pages(&run.pages, &steps.output)?;
    Ok(CreateReport { run, written })
}

pub fn write_pages(pages: &[RenderedPage], output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;
    let mut written = Vec::with_capacity(pages.len());
    for page in pages {
        let path = output_dir.join(page.file_name());
        write_text_file(&path, &page.body, true)?;
        written.push(path);
    }
    Ok(written)
}
