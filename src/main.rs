//! Benchmark CLI: score ranking sources and report Top-1 accuracy and MRR.

use anyhow::{Context, Result};
use clap::Parser;
use elbench::{benchmark, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "elbench")]
#[command(about = "Compare ranked disease predictions against ground-truth cases (Top-1 accuracy, MRR)")]
struct Args {
    /// Cases CSV (case_id,phenotypes,true_disease). Defaults to the configured cases file.
    #[arg(long)]
    cases: Option<PathBuf>,

    /// Ranking source as NAME=PATH (case_id,rank,disease). Repeatable; defaults to the configured sources.
    #[arg(long = "source", value_parser = parse_source)]
    sources: Vec<(String, PathBuf)>,

    /// Score the live LLM output file instead of the configured LLM mock file
    #[arg(long, conflicts_with = "sources")]
    live: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Exit with status 1 if any source scores below this Top-1 accuracy
    #[arg(long)]
    min_top1: Option<f64>,

    /// Exit with status 1 if any source scores below this MRR
    #[arg(long)]
    min_mrr: Option<f64>,
}

fn parse_source(raw: &str) -> std::result::Result<(String, PathBuf), String> {
    match raw.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got '{}'", raw)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config is only needed for whatever the command line leaves unspecified
    let config = if args.cases.is_none() || args.sources.is_empty() {
        Some(Config::load()?)
    } else {
        None
    };

    let log_level = config
        .as_ref()
        .map(|c| c.elbench.log_level.clone())
        .unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", log_level))
        .init();

    let cases_path = match &args.cases {
        Some(path) => path.clone(),
        None => config
            .as_ref()
            .map(Config::cases_path)
            .context("No cases file given and no config loaded")?,
    };
    let sources = match (&config, args.sources.is_empty()) {
        (Some(config), true) => config.source_paths(args.live),
        _ => args.sources.clone(),
    };

    let report = benchmark::run_benchmark(&cases_path, &sources)
        .with_context(|| format!("Benchmark failed (cases: {})", cases_path.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", benchmark::render_text(&report));
    }

    let below: Vec<&str> = report
        .sources
        .iter()
        .filter(|s| {
            args.min_top1.is_some_and(|t| s.metrics.top1_accuracy < t)
                || args.min_mrr.is_some_and(|t| s.metrics.mrr < t)
        })
        .map(|s| s.name.as_str())
        .collect();

    if !below.is_empty() {
        eprintln!("Metrics below threshold for: {}", below.join(", "));
        std::process::exit(1);
    }

    Ok(())
}
