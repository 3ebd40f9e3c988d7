//! LLM-backed ranking source: phenotype text in, ranked disease names out.

pub mod client;
pub mod prompt;
pub mod runner;

pub use client::OpenAiChatClient;
pub use prompt::parse_ranked_list;
pub use runner::run_llm_over_cases;

use crate::error::Result;
use async_trait::async_trait;

/// Anything that can propose a ranked list of candidate diseases for a case.
#[async_trait]
pub trait DiseaseRanker: Send + Sync {
    /// Return up to `k` disease names, best first.
    async fn suggest_diseases(&self, phenotypes: &str, k: usize) -> Result<Vec<String>>;
}
