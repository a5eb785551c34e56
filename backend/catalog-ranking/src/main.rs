use anyhow::{Context, Result};
use catalog_ranking::{catalog, Config, RankingEngine};
use std::io::{self, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load config first: it carries the fallback log level
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing (stderr, stdout carries the report)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    config
        .validate()
        .context("Configuration validation failed")?;
    info!(
        catalog_path = %config.catalog_path,
        fusion_keep = config.fusion_keep,
        "Starting catalog ranking"
    );

    let concepts = catalog::load_catalog(&config.catalog_path)
        .with_context(|| format!("Failed to load catalog from {}", config.catalog_path))?;

    let engine =
        RankingEngine::new(concepts, config.engine_settings()).context("Ranking pass failed")?;

    let mut summaries = engine.summaries();
    if config.output_limit > 0 {
        summaries.truncate(config.output_limit);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &summaries).context("Failed to write report")?;
    writeln!(out)?;

    info!(
        rows = summaries.len(),
        languages = engine.language_ranks().len(),
        "Report written"
    );

    Ok(())
}
