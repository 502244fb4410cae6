use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use labgen::config::{hall_effect_preset, ReportConfig};
use labgen::sim::{build_document, run_measurements, summarize};
use labgen::telemetry::init_tracing;

#[derive(Debug, Parser)]
#[command(author, version, about = "Generate a synthetic lab measurement report")]
struct Cli {
    /// TOML report configuration (defaults to the built-in Hall effect report)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report file; the document is appended if it already exists
    #[arg(long)]
    output: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Date shown in the report title (YYYY-MM-DD, defaults to today)
    #[arg(long)]
    date: Option<NaiveDate>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => ReportConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config: {}", path.display()))?,
        None => hall_effect_preset(),
    };
    if let Some(v) = cli.output {
        cfg.output = v;
    }
    if let Some(v) = cli.seed {
        cfg.seed = v;
    }
    cfg.validate().context("invalid report configuration")?;

    let date = cli.date.unwrap_or_else(|| Local::now().date_naive());

    let series = run_measurements(&cfg)?;
    let document = build_document(&cfg, &series, &date.to_string())?;
    document
        .append_to(&cfg.output)
        .with_context(|| format!("failed to write report: {}", cfg.output.display()))?;

    let summary = summarize(&cfg, &series);
    println!(
        "Report written. Seed: {} | Samples: {}",
        summary.seed, summary.samples
    );
    println!("Output: {}", cfg.output.display());
    for (heading, rms) in &summary.rms_residuals {
        println!("  noise RMS {rms:.4} | {heading}");
    }

    Ok(())
}
