//! Run the LLM over every case and write a rankings CSV (case_id,rank,disease).

use anyhow::{Context, Result};
use clap::Parser;
use elbench::data::{load_cases, write_rankings};
use elbench::llm::{run_llm_over_cases, OpenAiChatClient};
use elbench::Config;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "llm-rank")]
#[command(about = "Ask an LLM for ranked rare-disease candidates per case and save them as a ranking source")]
struct Args {
    /// Cases CSV. Defaults to the configured cases file.
    #[arg(long)]
    cases: Option<PathBuf>,

    /// Output rankings CSV. Defaults to the configured live output file.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Number of candidates to request per case (overrides llm.top_k)
    #[arg(long)]
    top_k: Option<usize>,

    /// Chat model (overrides llm.model)
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut config = Config::load()?;

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", config.elbench.log_level.clone()),
    )
    .init();

    if let Some(model) = args.model {
        config.llm.model = model;
    }
    let top_k = args.top_k.unwrap_or(config.llm.top_k);
    if top_k == 0 {
        anyhow::bail!("--top-k must be greater than 0");
    }

    let cases_path = args.cases.unwrap_or_else(|| config.cases_path());
    let out_path = args.out.unwrap_or_else(|| config.live_output_path());

    let cases = load_cases(&cases_path)
        .with_context(|| format!("Failed to load cases from {}", cases_path.display()))?;
    if cases.is_empty() {
        log::warn!("No cases in {}; writing an empty rankings file", cases_path.display());
    }

    let client = OpenAiChatClient::new(config.api_key()?, &config.llm)?;
    log::info!(
        "Ranking {} cases with {} (top {})",
        cases.len(),
        client.model(),
        top_k
    );

    let start = Instant::now();
    let rows = run_llm_over_cases(&client, &cases, top_k).await?;

    write_rankings(&out_path, &rows)
        .with_context(|| format!("Failed to write rankings to {}", out_path.display()))?;

    log::info!("=== LLM Ranking Complete ===");
    log::info!("Cases: {}", cases.len());
    log::info!("Ranking rows: {}", rows.len());
    log::info!("Time: {:?}", start.elapsed());
    println!("Saved live LLM results to {}", out_path.display());

    Ok(())
}
