//! Ranking aggregation and the two benchmark metrics: Top-1 accuracy and MRR.

pub mod aggregate;
pub mod score;

pub use aggregate::{build_best_rank_index, BestRankIndex};
pub use score::{compute_mrr, compute_top1_accuracy, evaluate, SourceMetrics};
