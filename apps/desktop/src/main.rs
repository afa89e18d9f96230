use std::{
    io::{self, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use gallery_core::{GalleryController, GalleryView, HttpImageStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, Overrides};

const SITE_TITLE: &str = "Pretty Interesting Sky Sightings";

#[derive(Parser, Debug)]
struct Args {
    /// Settings file; `gallery.toml` in the working directory is read when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    log_filter: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(
        args.config.as_deref(),
        Overrides {
            api_url: args.api_url,
            log_filter: args.log_filter,
        },
    )?;

    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let base_url = settings.api_base_url()?;
    info!(api_url = %base_url, "gallery: starting");

    let store = Arc::new(HttpImageStore::new(base_url));
    let mut controller = GalleryController::new(store);
    controller.refresh();
    controller.settle().await;

    let mut out = io::stdout().lock();
    render(&controller.view(), &mut out)?;
    out.flush()?;
    Ok(())
}

fn render(view: &GalleryView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{SITE_TITLE}")?;
    writeln!(out, "{}", "=".repeat(SITE_TITLE.len()))?;
    writeln!(out)?;

    if let Some(error) = &view.error {
        writeln!(out, "Could not load images: {error}")?;
    } else if view.cards.is_empty() {
        writeln!(out, "No sightings yet.")?;
    }

    for card in &view.cards {
        writeln!(out, "[{}] {}", card.id, card.title)?;
        if !card.description.is_empty() {
            writeln!(out, "    {}", card.description)?;
        }
        if let Some(src) = &card.src {
            writeln!(out, "    {src}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "\u{a9} 2024 {SITE_TITLE}")
}
