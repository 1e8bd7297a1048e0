//! The walk/transform/write pipeline that turns a source tree into a site.
use crate::{
    assets, front_matter, highlight, layout, logging::format_elapsed_time, markdown, page::Page,
};
use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, error, info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder, prelude::*};
use std::fs;
use std::path::{Path, PathBuf, StripPrefixError};
use std::time::Instant;
use walkdir::WalkDir;

/// Immutable build settings, shared by reference with every worker.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub layout_path: PathBuf,
    pub assets_dir: PathBuf,
    /// Stylesheet theme for pages that don't set `css` in their front matter.
    pub theme: String,
    /// Upper bound on worker threads; `None` uses the global rayon pool.
    pub jobs: Option<usize>,
}

impl SiteConfig {
    /// Conventional layout: `<source>/layout.html` and `<source>/assets`.
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        let source_dir = source_dir.into();
        Self {
            layout_path: source_dir.join("layout.html"),
            assets_dir: source_dir.join("assets"),
            output_dir: output_dir.into(),
            source_dir,
            theme: highlight::DEFAULT_THEME.to_string(),
            jobs: None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub built: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug)]
enum Outcome {
    Built,
    Skipped,
    Failed,
}

/// Rebuilds the whole site described by `config`.
///
/// Only output directory preparation and source enumeration are fatal. Asset and
/// per-document failures are logged and the build carries on.
pub fn run(config: &SiteConfig) -> Result<BuildReport> {
    let start = Instant::now();

    prepare_output_dir(&config.output_dir)?;

    match assets::copy_tree(&config.assets_dir, &config.output_dir) {
        Ok(bytes) => info!(target: "assets", "Copied {} bytes from {:?}", bytes, config.assets_dir),
        Err(err) => warn!(target: "assets", "{:#}", anyhow::Error::from(err)),
    }

    let files = collect_markdown_files(&config.source_dir)?;
    info!(target: "build", "Found {} markdown files in {:?}", files.len(), config.source_dir);

    let report = match worker_pool(config.jobs) {
        Some(pool) => pool.install(|| process_files(&files, config)),
        None => process_files(&files, config),
    };

    info!(
        target: "build",
        "{} built, {} skipped, {} failed in {}",
        report.built,
        report.skipped,
        report.failed,
        format_elapsed_time(start.elapsed())
    );

    Ok(report)
}

/// A dedicated pool of `jobs` threads. Falls back to the global pool if it can't be built.
fn worker_pool(jobs: Option<usize>) -> Option<ThreadPool> {
    let jobs = jobs?;
    match ThreadPoolBuilder::new().num_threads(jobs).build() {
        Ok(pool) => Some(pool),
        Err(err) => {
            warn!(target: "build", "Failed to build a pool of {} worker threads, using the global pool: {}", jobs, err);
            None
        }
    }
}

/// Removes any previous output and recreates an empty output root.
pub fn prepare_output_dir(out_dir: &Path) -> Result<()> {
    if out_dir.exists() {
        fs::remove_dir_all(out_dir)
            .with_context(|| format!("Failed to remove existing output directory: {:?}", out_dir))?;
    }
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", out_dir))?;

    Ok(())
}

/// Every `.md` file under `root`, in file name order.
pub fn collect_markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry
            .with_context(|| format!("Failed to enumerate markdown files under {:?}", root))?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().and_then(|s| s.to_str()) == Some("md") {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Maps `src/a/b.md` to `dist/a/b.html`.
pub fn output_path(
    source: &Path,
    source_root: &Path,
    output_root: &Path,
) -> Result<PathBuf, StripPrefixError> {
    let relative_path = source.strip_prefix(source_root)?;
    Ok(output_root.join(relative_path).with_extension("html"))
}

fn process_files(files: &[PathBuf], config: &SiteConfig) -> BuildReport {
    let outcomes: Vec<Outcome> = files
        .par_iter()
        .map(|path| match process_markdown_file(path, config) {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(target: "pages", "Failed to build {:?}: {:#}", path, err);
                Outcome::Failed
            }
        })
        .collect();

    outcomes
        .iter()
        .fold(BuildReport::default(), |mut report, outcome| {
            match outcome {
                Outcome::Built => report.built += 1,
                Outcome::Skipped => report.skipped += 1,
                Outcome::Failed => report.failed += 1,
            }
            report
        })
}

/// Read, parse, render and write a single document.
fn process_markdown_file(path: &Path, config: &SiteConfig) -> Result<Outcome> {
    let start = Instant::now();

    let file_content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read markdown file: {:?}", path))?;

    let (metadata, body) =
        front_matter::parse(&file_content).context("Failed to parse front matter")?;

    if !metadata.published {
        debug!(target: "pages", "Skipping unpublished {:?}", path);
        return Ok(Outcome::Skipped);
    }

    let html_body = markdown::render(&body).context("Failed to convert markdown to HTML")?;

    let theme = metadata.css_theme.as_deref().unwrap_or(&config.theme);
    let inline_css = highlight::extract_css(theme).context("Failed to generate inline CSS")?;

    let page = Page::assemble(path, metadata, html_body, inline_css);
    let full_html = layout::render(&page, &config.layout_path)?;

    let output_path = output_path(path, &config.source_dir, &config.output_dir)?;
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create parent directory for {:?}", output_path))?;
    }
    fs::write(&output_path, full_html)
        .with_context(|| format!("Failed to write HTML file: {:?}", output_path))?;

    info!(
        target: "pages",
        "{} -> {} {}",
        path.display(),
        output_path.display().to_string().dimmed(),
        format_elapsed_time(start.elapsed())
    );

    Ok(Outcome::Built)
}
