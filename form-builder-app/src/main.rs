//! Form builder - terminal application entry point.

use anyhow::Context;
use clap::Parser;
use form_builder::{FormBuilder, locale};
use form_builder_ratatui::RatatuiFrontend;
use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "form-builder")]
#[command(version)]
#[command(about = "Build dynamic forms interactively in the terminal", long_about = None)]
struct Cli {
    /// Heading shown at the top of the screen
    #[arg(long, default_value = locale::APP_TITLE)]
    title: String,

    /// How long a closed modal stays on screen, in milliseconds
    #[arg(long, default_value_t = 300)]
    grace_ms: u64,

    /// Event loop poll interval, in milliseconds
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// The terminal belongs to the UI, so logs only go to a file.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("cannot install log subscriber")?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    tracing::info!("form-builder v{}", env!("CARGO_PKG_VERSION"));

    let frontend = RatatuiFrontend::new()
        .with_title(cli.title)
        .with_tick(Duration::from_millis(cli.tick_ms));
    let mut session = FormBuilder::new().with_grace_period(Duration::from_millis(cli.grace_ms));
    session.run(frontend)?;

    let controller = session.controller();
    if !controller.responses().is_empty() {
        println!("{}", locale::RESPONSES_TITLE);
        for entry in controller.response_summary() {
            println!("- {}: {}", entry.text, entry.answer);
        }
    }

    Ok(())
}
