use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use glossar_core::config::{GlossarConfig, StepDirs, load_config};
use glossar_core::create::{CreateReport, create_glossary};
use glossar_core::diff::{PageStatus, diff_pages};
use glossar_core::pipeline::RunStats;
use glossar_core::runtime::{
    PathOverrides, PrepareOptions, ResolutionContext, ResolvedPaths, prepare_layout, resolve_paths,
};
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

#[derive(Debug, Parser)]
#[command(
    name = "glossar",
    version,
    about = "Builds the alphabetical glossary pages from the chronological glossary tables"
)]
struct Cli {
    #[arg(long, global = true, value_name = "PATH")]
    project_root: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Print resolved runtime diagnostics")]
    diagnostics: bool,
    #[arg(long, global = true, help = "Log debug events")]
    debug: bool,
    #[arg(long, global = true, value_name = "FILE", help = "Also write log events to FILE")]
    log: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone)]
struct RuntimeOptions {
    project_root: Option<PathBuf>,
    config: Option<PathBuf>,
    diagnostics: bool,
}

impl RuntimeOptions {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            project_root: cli.project_root.clone(),
            config: cli.config.clone(),
            diagnostics: cli.diagnostics,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create the step directories and the default config")]
    Prepare(PrepareArgs),
    #[command(about = "Build the alphabetical pages from the source pages")]
    Create(CreateArgs),
    #[command(about = "Diff generated pages against the current versions")]
    Diff,
    #[command(about = "Run prepare, create and diff")]
    All(PrepareArgs),
}

#[derive(Debug, Args)]
struct PrepareArgs {
    #[arg(long, help = "Overwrite an existing .glossar/config.toml")]
    force: bool,
}

#[derive(Debug, Args)]
struct CreateArgs {
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.debug, cli.log.as_deref())?;
    let runtime = RuntimeOptions::from_cli(&cli);

    match cli.command {
        Some(Commands::Prepare(args)) => run_prepare(&runtime, &args),
        Some(Commands::Create(args)) => run_create(&runtime, &args),
        Some(Commands::Diff) => run_diff(&runtime),
        Some(Commands::All(args)) => {
            run_prepare(&runtime, &args)?;
            println!();
            run_create(&runtime, &CreateArgs { json: false })?;
            println!();
            run_diff(&runtime)
        }
        None => {
            let mut command = Cli::command();
            command.print_help()?;
            println!();
            Ok(())
        }
    }
}

fn setup_tracing(debug: bool, log_path: Option<&Path>) -> Result<()> {
    let level = if debug {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let mut existing_log = None;
    let file_layer = match log_path {
        Some(path) if path.exists() => {
            existing_log = Some(path);
            None
        }
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(level)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    if let Some(path) = existing_log {
        warn!(
            "log file {} already exists; logging to stderr only",
            normalize_path(path)
        );
    }
    Ok(())
}

fn run_prepare(runtime: &RuntimeOptions, args: &PrepareArgs) -> Result<()> {
    let paths = resolve_runtime_paths(runtime)?;
    let config = load_config(&paths.config_path)?;
    let steps = config.step_dirs(&paths.project_root);
    let report = prepare_layout(&paths, &steps, &PrepareOptions { force: args.force })?;

    println!("Prepared glossar layout");
    println!("project_root: {}", normalize_path(&paths.project_root));
    print_step_dirs(&steps);
    println!("config_path: {}", normalize_path(&paths.config_path));
    println!("created_dirs: {}", report.created_dirs.len());
    println!("wrote_config: {}", format_flag(report.wrote_config));
    if !report.wrote_config {
        println!("config: kept existing file (use --force to overwrite)");
    }
    if runtime.diagnostics {
        println!("\n[diagnostics]\n{}", paths.diagnostics());
    }
    Ok(())
}

fn run_create(runtime: &RuntimeOptions, args: &CreateArgs) -> Result<()> {
    let paths = resolve_runtime_paths(runtime)?;
    let config = load_runtime_config(&paths)?;
    let steps = config.step_dirs(&paths.project_root);
    let report = create_glossary(&config, &steps)?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        );
    } else {
        print_create_report(&report);
    }
    if runtime.diagnostics {
        println!("\n[diagnostics]\n{}", paths.diagnostics());
    }
    Ok(())
}

fn run_diff(runtime: &RuntimeOptions) -> Result<()> {
    let paths = resolve_runtime_paths(runtime)?;
    let config = load_runtime_config(&paths)?;
    let steps = config.step_dirs(&paths.project_root);
    let pages = diff_pages(&steps.output, &steps.current, &steps.diff)?;

    println!("diff");
    println!("output_dir: {}", normalize_path(&steps.output));
    println!("current_dir: {}", normalize_path(&steps.current));
    println!("diff_dir: {}", normalize_path(&steps.diff));
    println!("pages: {}", pages.len());
    for page in &pages {
        match page.status {
            PageStatus::Changed => println!(
                "page.{}: {} (+{} -{})",
                page.file_name,
                page.status.as_str(),
                page.added,
                page.removed
            ),
            _ => println!("page.{}: {}", page.file_name, page.status.as_str()),
        }
    }
    let changed = pages
        .iter()
        .filter(|page| page.status == PageStatus::Changed)
        .count();
    let missing = pages
        .iter()
        .filter(|page| page.status == PageStatus::Missing)
        .count();
    println!("changed: {changed}");
    println!("missing: {missing}");
    if runtime.diagnostics {
        println!("\n[diagnostics]\n{}", paths.diagnostics());
    }
    Ok(())
}

fn print_create_report(report: &CreateReport) {
    println!("create");
    println!("max_issue: {}", report.run.max_issue);
    print_run_stats("stats", &report.run.stats);
    println!("pages_written: {}", report.written.len());
    for path in &report.written {
        println!("page: {}", normalize_path(path));
    }
}

fn print_run_stats(prefix: &str, stats: &RunStats) {
    println!("{prefix}.sources: {}", stats.sources);
    println!("{prefix}.entries: {}", stats.entries);
    println!("{prefix}.renamed: {}", stats.renamed);
    println!("{prefix}.dropped: {}", stats.dropped);
    println!("{prefix}.upgraded: {}", stats.upgraded);
    println!("{prefix}.merged: {}", stats.merged);
    if stats.by_bucket.is_empty() {
        println!("{prefix}.by_bucket: <empty>");
    } else {
        for (bucket, count) in &stats.by_bucket {
            println!("{prefix}.bucket.{bucket}: {count}");
        }
    }
}

fn print_step_dirs(steps: &StepDirs) {
    println!("sources_dir: {}", normalize_path(&steps.sources));
    println!("current_dir: {}", normalize_path(&steps.current));
    println!("output_dir: {}", normalize_path(&steps.output));
    println!("diff_dir: {}", normalize_path(&steps.diff));
}

fn load_runtime_config(paths: &ResolvedPaths) -> Result<GlossarConfig> {
    if !paths.config_path.exists() {
        warn!(
            "config {} not found; using built-in defaults without renames (run `glossar prepare`)",
            normalize_path(&paths.config_path)
        );
    }
    load_config(&paths.config_path)
}

fn resolve_runtime_paths(runtime: &RuntimeOptions) -> Result<ResolvedPaths> {
    dotenvy::dotenv().ok();

    let context = ResolutionContext::from_process()?;
    let overrides = PathOverrides {
        project_root: runtime.project_root.clone(),
        config: runtime.config.clone(),
    };

    let initial = resolve_paths(&context, &overrides)?;
    let project_env = initial.project_root.join(".env");
    if project_env.exists() {
        let _ = dotenvy::from_path_override(&project_env);
    }

    resolve_paths(&context, &overrides)
}

fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn format_flag(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
