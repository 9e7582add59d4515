use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wormnet::{
    analysis,
    config::{AnalysisConfig, Cli, OutputFormat},
    report,
};

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AnalysisConfig::from(&cli);

    info!(input = %config.input.display(), "analysing connectome");

    let report = analysis::run(&config)
        .with_context(|| format!("failed to analyse {}", config.input.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.format {
        OutputFormat::Text => report::render_text(&report, &mut out),
        OutputFormat::Json => report::render_json(&report, &mut out),
    }
    .context("failed to write the report")?;

    out.flush()?;

    Ok(())
}
