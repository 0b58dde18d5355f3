use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::pipeline::PipelineOptions;
use crate::rename::RenameTable;
use crate::render::DEFAULT_PAGE_PREFIX;
use crate::visible::{DEFAULT_TEMPLATE_NAMES, DisplayTextResolver};

pub const DEFAULT_SOURCES_DIR: &str = "steps/sources";
pub const DEFAULT_CURRENT_DIR: &str = "steps/current";
pub const DEFAULT_OUTPUT_DIR: &str = "steps/output";
pub const DEFAULT_DIFF_DIR: &str = "steps/diff";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct GlossarConfig {
    #[serde(default)]
    pub glossar: GlossarSection,
    #[serde(default)]
    pub paths: PathsSection,
    #[serde(default)]
    pub rename: RenameTable,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct GlossarSection {
    pub page_prefix: Option<String>,
    pub template_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct PathsSection {
    pub sources_dir: Option<PathBuf>,
    pub current_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub diff_dir: Option<PathBuf>,
}

/// Absolute step directories of one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDirs {
    pub sources: PathBuf,
    pub current: PathBuf,
    pub output: PathBuf,
    pub diff: PathBuf,
}

impl StepDirs {
    pub fn all(&self) -> [&Path; 4] {
        [&self.sources, &self.current, &self.output, &self.diff]
    }
}

impl GlossarConfig {
    /// Resolve the page name prefix: env GLOSSAR_PAGE_PREFIX > config > DEFAULT_PAGE_PREFIX.
    pub fn page_prefix(&self) -> String {
        self.page_prefix_with_lookup(|key| env::var(key).ok())
    }

    fn page_prefix_with_lookup<F>(&self, lookup_env: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup_env("GLOSSAR_PAGE_PREFIX") {
            let trimmed = value.trim().to_string();
            if !trimmed.is_empty() {
                return trimmed;
            }
        }
        self.glossar
            .page_prefix
            .clone()
            .unwrap_or_else(|| DEFAULT_PAGE_PREFIX.to_string())
    }

    pub fn template_names(&self) -> Vec<String> {
        match &self.glossar.template_names {
            Some(names) => names.clone(),
            None => DEFAULT_TEMPLATE_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            page_prefix: self.page_prefix(),
            display: DisplayTextResolver::new(&self.template_names()),
        }
    }

    pub fn step_dirs(&self, project_root: &Path) -> StepDirs {
        let resolve = |configured: &Option<PathBuf>, fallback: &str| {
            let path = configured
                .as_deref()
                .unwrap_or_else(|| Path::new(fallback));
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                project_root.join(path)
            }
        };
        StepDirs {
            sources: resolve(&self.paths.sources_dir, DEFAULT_SOURCES_DIR),
            current: resolve(&self.paths.current_dir, DEFAULT_CURRENT_DIR),
            output: resolve(&self.paths.output_dir, DEFAULT_OUTPUT_DIR),
            diff: resolve(&self.paths.diff_dir, DEFAULT_DIFF_DIR),
        }
    }
}

/// Load and parse a GlossarConfig from a TOML file. Returns default if file doesn't exist.
pub fn load_config(config_path: &Path) -> Result<GlossarConfig> {
    if !config_path.exists() {
        return Ok(GlossarConfig::default());
    }
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let parsed: GlossarConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_no_renames() {
        let config = GlossarConfig::default();
        assert!(config.rename.is_empty());
        assert!(config.glossar.page_prefix.is_none());
        assert_eq!(config.template_names(), vec!["WP".to_string()]);
    }

    #[test]
    fn load_config_returns_default_for_missing_file() {
        let config = load_config(Path::new("/nonexistent/config.toml")).expect("load config");
        assert_eq!(config, GlossarConfig::default());
    }

    #[test]
    fn load_config_parses_all_sections() {
        let temp = tempdir().expect("tempdir");
        let config_path = temp.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[glossar]
page_prefix = "Atlan-Glossar"
template_names = ["WP", "Wikipedia"]

[paths]
sources_dir = "input"
output_dir = "/srv/glossar/out"

[rename]
"Ernst Ellert" = "[[Ernst Ellert|Ellert, Ernst]]"
"#,
        )
        .expect("write config");

        let config = load_config(&config_path).expect("load config");
        assert_eq!(
            config.page_prefix_with_lookup(|_| None),
            "Atlan-Glossar"
        );
        assert_eq!(config.template_names(), vec!["WP", "Wikipedia"]);
        assert_eq!(config.rename.len(), 1);
        assert_eq!(
            config.rename.get("Ernst Ellert"),
            Some("[[Ernst Ellert|Ellert, Ernst]]")
        );

        let dirs = config.step_dirs(Path::new("/project"));
        assert_eq!(dirs.sources, PathBuf::from("/project/input"));
        assert_eq!(dirs.current, PathBuf::from("/project/steps/current"));
        assert_eq!(dirs.output, PathBuf::from("/srv/glossar/out"));
        assert_eq!(dirs.diff, PathBuf::from("/project/steps/diff"));
    }

    #[test]
    fn load_config_tolerates_partial_toml() {
        let temp = tempdir().expect("tempdir");
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "[paths]\ndiff_dir = \"d\"\n").expect("write config");

        let config = load_config(&config_path).expect("load config");
        assert!(config.rename.is_empty());
        assert_eq!(config.page_prefix_with_lookup(|_| None), DEFAULT_PAGE_PREFIX);
    }

    #[test]
    fn load_config_returns_error_for_invalid_toml() {
        let temp = tempdir().expect("tempdir");
        let config_path = temp.path().join("config.toml");
        fs::write(&config_path, "[glossar\npage_prefix = \"oops\"").expect("write config");
        let error = load_config(&config_path).expect_err("must fail");
        assert!(error.to_string().contains("failed to parse"));
    }

    #[test]
    fn page_prefix_prefers_env_over_config() {
        let config = GlossarConfig {
            glossar: GlossarSection {
                page_prefix: Some("From Config".to_string()),
                template_names: None,
            },
            ..GlossarConfig::default()
        };
        let prefix = config.page_prefix_with_lookup(|key| {
            (key == "GLOSSAR_PAGE_PREFIX").then(|| "  From Env ".to_string())
        });
        assert_eq!(prefix, "From Env");

        let blank = config.page_prefix_with_lookup(|_| Some("   ".to_string()));
        assert_eq!(blank, "From Config");
    }

    #[test]
    fn empty_template_list_disables_templates() {
        let config = GlossarConfig {
            glossar: GlossarSection {
                page_prefix: None,
                template_names: Some(Vec::new()),
            },
            ..GlossarConfig::default()
        };
        let display = config.pipeline_options().display;
        assert_eq!(display.resolve("{{WP|Foo}}"), "{{WP|Foo}}");
        assert_eq!(display.resolve("[[Foo]]"), "Foo");
    }
}
