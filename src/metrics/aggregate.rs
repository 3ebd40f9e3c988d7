//! Collapse raw ranking rows into the best (lowest) rank per case and candidate.

use crate::data::RankingEntry;
use crate::error::{ElbenchError, Result};
use std::collections::HashMap;

/// Best observed rank for every `(case_id, candidate)` pair in a ranking source.
///
/// Keys borrow from the entries the index was built from and are compared
/// verbatim. A pair that never appeared has no rank: [`BestRankIndex::best_rank`]
/// returns `None` rather than a sentinel.
#[derive(Debug, Default, Clone)]
pub struct BestRankIndex<'a> {
    by_case: HashMap<&'a str, HashMap<&'a str, u64>>,
    pairs: usize,
}

impl<'a> BestRankIndex<'a> {
    /// Best rank recorded for `candidate` in `case_id`, if it was ranked at all.
    pub fn best_rank(&self, case_id: &str, candidate: &str) -> Option<u64> {
        self.by_case.get(case_id)?.get(candidate).copied()
    }

    /// Number of distinct `(case_id, candidate)` pairs.
    pub fn len(&self) -> usize {
        self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs == 0
    }

    fn record(&mut self, case_id: &'a str, candidate: &'a str, rank: u64) {
        let candidates = self.by_case.entry(case_id).or_default();
        match candidates.get_mut(candidate) {
            Some(best) => *best = (*best).min(rank),
            None => {
                candidates.insert(candidate, rank);
                self.pairs += 1;
            }
        }
    }
}

/// Build the best-rank index for a ranking source.
///
/// The result depends only on the multiset of `(case_id, candidate, rank)`
/// triples. Fails on the first row whose rank is below 1.
pub fn build_best_rank_index(entries: &[RankingEntry]) -> Result<BestRankIndex<'_>> {
    let mut index = BestRankIndex::default();
    for entry in entries {
        let rank = u64::try_from(entry.rank)
            .ok()
            .filter(|r| *r >= 1)
            .ok_or_else(|| ElbenchError::InvalidRank {
                case_id: entry.case_id.clone(),
                candidate: entry.candidate.clone(),
                rank: entry.rank,
            })?;
        index.record(&entry.case_id, &entry.candidate, rank);
    }
    Ok(index)
}
