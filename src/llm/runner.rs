use super::DiseaseRanker;
use crate::data::{entries_from_ranked_list, Case, RankingEntry};
use crate::error::Result;

/// Ask `ranker` for the top `top_k` diseases of every case, in order, and
/// materialize the answers as ranking rows.
///
/// Cases for which the ranker returns nothing contribute no rows (they score as
/// misses later). A ranker error aborts the run.
pub async fn run_llm_over_cases<R>(
    ranker: &R,
    cases: &[Case],
    top_k: usize,
) -> Result<Vec<RankingEntry>>
where
    R: DiseaseRanker + ?Sized,
{
    let mut rows = Vec::new();

    for (idx, case) in cases.iter().enumerate() {
        log::info!("[{}/{}] Case {}", idx + 1, cases.len(), case.case_id);
        log::debug!("Phenotypes: {}", case.phenotypes);

        let mut diseases = ranker.suggest_diseases(&case.phenotypes, top_k).await?;
        diseases.truncate(top_k);

        if diseases.is_empty() {
            log::warn!("LLM returned no diseases for case {}", case.case_id);
            continue;
        }

        for (rank, disease) in diseases.iter().enumerate() {
            log::info!("  {}. {}", rank + 1, disease);
        }
        rows.extend(entries_from_ranked_list(&case.case_id, &diseases));
    }

    Ok(rows)
}
