//! Top-1 accuracy and Mean Reciprocal Rank over a ground-truth case set.
//!
//! Each metric builds its own [`BestRankIndex`] from the ranking rows, so a
//! true disease only needs to appear once at its best position among
//! duplicated or unordered submissions. A case whose true disease was never
//! ranked counts as a miss.

use crate::data::{Case, RankingEntry};
use crate::error::Result;
use crate::metrics::aggregate::{build_best_rank_index, BestRankIndex};
use serde::Serialize;

/// Fraction of cases whose true disease has best rank exactly 1.
///
/// Returns 0.0 for an empty case set.
pub fn compute_top1_accuracy(cases: &[Case], entries: &[RankingEntry]) -> Result<f64> {
    let index = build_best_rank_index(entries)?;
    warn_if_empty(cases);
    Ok(top1_from_index(cases, &index))
}

/// Mean over cases of `1 / best_rank` of the true disease (0 when unranked).
///
/// Returns 0.0 for an empty case set.
pub fn compute_mrr(cases: &[Case], entries: &[RankingEntry]) -> Result<f64> {
    let index = build_best_rank_index(entries)?;
    warn_if_empty(cases);
    Ok(mrr_from_index(cases, &index))
}

/// Scores for one ranking source against a case set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceMetrics {
    pub case_count: usize,
    /// Cases whose true disease was ranked at any position.
    pub found: usize,
    pub top1_accuracy: f64,
    pub mrr: f64,
}

/// Compute both metrics for a ranking source from a single index.
pub fn evaluate(cases: &[Case], entries: &[RankingEntry]) -> Result<SourceMetrics> {
    let index = build_best_rank_index(entries)?;
    warn_if_empty(cases);
    let found = cases
        .iter()
        .filter(|c| index.best_rank(&c.case_id, &c.true_disease).is_some())
        .count();

    Ok(SourceMetrics {
        case_count: cases.len(),
        found,
        top1_accuracy: top1_from_index(cases, &index),
        mrr: mrr_from_index(cases, &index),
    })
}

fn warn_if_empty(cases: &[Case]) {
    if cases.is_empty() {
        log::warn!("Empty case set; Top-1 accuracy and MRR are reported as 0.0");
    }
}

fn top1_from_index(cases: &[Case], index: &BestRankIndex<'_>) -> f64 {
    if cases.is_empty() {
        return 0.0;
    }
    let hits = cases
        .iter()
        .filter(|c| index.best_rank(&c.case_id, &c.true_disease) == Some(1))
        .count();
    hits as f64 / cases.len() as f64
}

fn mrr_from_index(cases: &[Case], index: &BestRankIndex<'_>) -> f64 {
    if cases.is_empty() {
        return 0.0;
    }
    let sum: f64 = cases
        .iter()
        .map(|c| match index.best_rank(&c.case_id, &c.true_disease) {
            Some(rank) => 1.0 / rank as f64,
            None => 0.0,
        })
        .sum();
    sum / cases.len() as f64
}
