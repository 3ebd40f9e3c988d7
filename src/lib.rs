pub mod config;
pub mod error;
pub mod data;
pub mod metrics;
pub mod llm;
pub mod benchmark;

pub use config::Config;
pub use error::{ElbenchError, Result};
pub use data::{Case, RankingEntry};
pub use metrics::{build_best_rank_index, compute_mrr, compute_top1_accuracy, BestRankIndex};
