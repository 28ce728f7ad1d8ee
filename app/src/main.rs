// ==============================================================================
// main.rs - Variant Report Entry Point
// ==============================================================================
// Description: Loads a variant analysis report and renders it as text, HTML, or JSON
// Author: Matt Barham
// Created: 2026-10-17
// Modified: 2026-10-17
// Version: 1.0.0
// ==============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use variant_report::config::ReportConfig;
use variant_report::fetch::source_for;
use variant_report::render::renderer_for;
use variant_report::report::ReportLoader;
use variant_report::table::DEFAULT_ROW_CAP;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report location: http(s) URL or directory holding analysis_results.json and variants.json
    #[arg(short, long, env = "VARIANT_REPORT_SOURCE", default_value = ".")]
    source: String,

    /// Output format (text, html, or json)
    #[arg(short, long, env = "VARIANT_REPORT_FORMAT", default_value = "text")]
    format: String,

    /// Maximum variant rows shown in the table
    #[arg(short, long, env = "VARIANT_REPORT_ROW_CAP", default_value_t = DEFAULT_ROW_CAP, allow_negative_numbers = true)]
    row_cap: i64,

    /// Only show table rows containing this text (case-insensitive)
    #[arg(long, env = "VARIANT_REPORT_FILTER")]
    filter: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, env = "VARIANT_REPORT_OUTPUT")]
    output: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, env = "VARIANT_REPORT_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Exit with an error when any report section fails to load
    #[arg(long, env = "VARIANT_REPORT_STRICT")]
    strict: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing (stderr, so stdout carries only the report)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "variant_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = ReportConfig::new(
        args.source,
        &args.format,
        args.row_cap,
        args.filter,
        args.output,
        args.timeout_secs,
        args.strict,
    )
    .context("Invalid configuration")?;

    let source = source_for(&config.source, config.timeout)
        .context("Failed to open report source")?;
    let loader = ReportLoader::new(config.row_cap).context("Invalid row cap")?;

    // Load both sections (failures are kept per section)
    let report = loader.load(source.as_ref()).await;

    let renderer = renderer_for(config.format, config.filter.clone());
    let rendered = renderer
        .render(&report.view())
        .context("Failed to render report")?;

    match &config.output {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    if !report.is_complete() {
        warn!("Report rendered with unavailable sections");
        if config.strict {
            anyhow::bail!("One or more report sections failed to load");
        }
    }

    Ok(())
}
