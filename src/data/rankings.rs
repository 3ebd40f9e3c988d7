use super::read_records;
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 3] = ["case_id", "rank", "disease"];

/// One `(case, rank, candidate)` observation from a ranking source.
///
/// Rows are not deduplicated: the same candidate may appear several times for a
/// case with different ranks. Rank validity (>= 1) is checked when the rows are
/// aggregated, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub case_id: String,
    #[serde(deserialize_with = "deserialize_rank")]
    pub rank: i64,
    #[serde(rename = "disease")]
    pub candidate: String,
}

impl RankingEntry {
    pub fn new(case_id: impl Into<String>, rank: i64, candidate: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            rank,
            candidate: candidate.into(),
        }
    }
}

/// Ranks tolerate surrounding whitespace (`C1, 2,Marfan`). Keys never get trimmed.
fn deserialize_rank<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.trim()
        .parse()
        .map_err(|e| serde::de::Error::custom(format!("invalid rank '{}': {}", raw, e)))
}

/// Load ranking rows from a CSV of the form `case_id,rank,disease`.
pub fn load_rankings(path: impl AsRef<Path>) -> Result<Vec<RankingEntry>> {
    read_records(path.as_ref(), "rankings", &REQUIRED_COLUMNS)
}

/// Write ranking rows as `case_id,rank,disease`.
///
/// The header row is always written, so an empty run still yields a file that
/// [`load_rankings`] accepts.
pub fn write_rankings(path: impl AsRef<Path>, entries: &[RankingEntry]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    writer.write_record(REQUIRED_COLUMNS)?;
    for entry in entries {
        writer.serialize(entry)?;
    }
    writer.flush()?;

    log::debug!("Wrote {} ranking rows to {}", entries.len(), path.display());
    Ok(())
}

/// Materialize an ordered candidate list into rows ranked `1..=k`.
pub fn entries_from_ranked_list(case_id: &str, candidates: &[String]) -> Vec<RankingEntry> {
    candidates
        .iter()
        .enumerate()
        .map(|(idx, candidate)| RankingEntry::new(case_id, idx as i64 + 1, candidate.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElbenchError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_rankings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rankings.csv");
        fs::write(
            &path,
            "case_id,rank,disease\nC1,2,Marfan\nC1,1,EDS\nC2,1,Noonan syndrome\n",
        )
        .unwrap();

        let entries = load_rankings(&path).unwrap();
        assert_eq!(
            entries,
            vec![
                RankingEntry::new("C1", 2, "Marfan"),
                RankingEntry::new("C1", 1, "EDS"),
                RankingEntry::new("C2", 1, "Noonan syndrome"),
            ]
        );
    }

    #[test]
    fn test_load_rankings_missing_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rankings.csv");
        fs::write(&path, "case_id,candidate\nC1,Marfan\n").unwrap();

        let err = load_rankings(&path).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing columns in rankings CSV: rank, disease"
        );
    }

    #[test]
    fn test_load_rankings_trims_rank_only() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rankings.csv");
        fs::write(&path, "case_id,rank,disease\nC1, 2,Marfan\nC2,3 , EDS\n").unwrap();

        let entries = load_rankings(&path).unwrap();
        assert_eq!(
            entries,
            vec![
                RankingEntry::new("C1", 2, "Marfan"),
                RankingEntry::new("C2", 3, " EDS"),
            ]
        );
    }

    #[test]
    fn test_load_rankings_rejects_non_integer_rank() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rankings.csv");
        fs::write(&path, "case_id,rank,disease\nC1,first,Marfan\n").unwrap();

        let err = load_rankings(&path).unwrap_err();
        assert!(matches!(err, ElbenchError::Csv(_)));
    }

    #[test]
    fn test_write_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");
        let entries = entries_from_ranked_list(
            "7",
            &["Marfan syndrome".to_string(), "Loeys-Dietz, type 1".to_string()],
        );

        write_rankings(&path, &entries).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("case_id,rank,disease\n"));
        assert!(written.contains("7,2,\"Loeys-Dietz, type 1\""));
        assert_eq!(load_rankings(&path).unwrap(), entries);
    }

    #[test]
    fn test_write_empty_keeps_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");

        write_rankings(&path, &[]).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "case_id,rank,disease\n");
        assert!(load_rankings(&path).unwrap().is_empty());
    }

    #[test]
    fn test_entries_from_ranked_list_numbers_from_one() {
        let entries = entries_from_ranked_list("C1", &["A".to_string(), "B".to_string()]);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].rank, 2);
        assert!(entries.iter().all(|e| e.case_id == "C1"));
    }
}
