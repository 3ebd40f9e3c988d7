//! Tabular ingestion of ground-truth cases and ranking sources.

pub mod cases;
pub mod rankings;

pub use cases::{load_cases, Case};
pub use rankings::{entries_from_ranked_list, load_rankings, write_rankings, RankingEntry};

use crate::error::{ElbenchError, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// Read every row of a headered CSV file into `T`, rejecting the file up front
/// when any of `required` is absent from the header row.
///
/// Extra columns are ignored. Key fields are taken verbatim (no trimming).
pub(crate) fn read_records<T: DeserializeOwned>(
    path: &Path,
    source_kind: &'static str,
    required: &[&str],
) -> Result<Vec<T>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = required
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ElbenchError::MissingColumns {
            source_kind,
            columns: missing,
        });
    }

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }

    log::debug!("Loaded {} {} rows from {}", rows.len(), source_kind, path.display());
    Ok(rows)
}
