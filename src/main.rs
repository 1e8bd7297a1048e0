// Folio - A concurrent static site generator for Markdown documents

mod assets;
mod error;
mod front_matter;
mod highlight;
mod layout;
mod logging;
mod markdown;
mod page;
mod pipeline;

use anyhow::Result;
use clap::Parser;
use pipeline::SiteConfig;
use std::path::PathBuf;

/// A static site generator that builds HTML pages from Markdown files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The directory containing Markdown files, the layout and the assets
    #[arg(short, long, default_value = "src")]
    source_dir: PathBuf,

    /// The output directory, removed and rebuilt on every run
    #[arg(short, long, default_value = "dist")]
    out_dir: PathBuf,

    /// The layout template [default: <SOURCE_DIR>/layout.html]
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// The directory mirrored into the output root [default: <SOURCE_DIR>/assets]
    #[arg(short, long)]
    assets_dir: Option<PathBuf>,

    /// Highlighting theme for the inline stylesheet, unless a page sets `css`
    #[arg(short, long, default_value = highlight::DEFAULT_THEME)]
    theme: String,

    /// Maximum number of pages rendered in parallel
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Print the available highlighting themes and exit
    #[arg(long)]
    list_themes: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl From<Cli> for SiteConfig {
    fn from(cli: Cli) -> Self {
        let mut config = SiteConfig::new(cli.source_dir, cli.out_dir);
        if let Some(layout) = cli.layout {
            config.layout_path = layout;
        }
        if let Some(assets_dir) = cli.assets_dir {
            config.assets_dir = assets_dir;
        }
        config.theme = cli.theme;
        config.jobs = cli.jobs;
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.quiet);

    if cli.list_themes {
        for name in highlight::theme_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = SiteConfig::from(cli);
    pipeline::run(&config)?;

    Ok(())
}
