use super::read_records;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 3] = ["case_id", "phenotypes", "true_disease"];

/// Ground-truth record for one benchmark case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// Opaque identifier, unique within a case set.
    pub case_id: String,
    /// Free-text phenotype description handed to ranking sources.
    pub phenotypes: String,
    /// Name of the correct diagnosis.
    pub true_disease: String,
}

impl Case {
    pub fn new(
        case_id: impl Into<String>,
        phenotypes: impl Into<String>,
        true_disease: impl Into<String>,
    ) -> Self {
        Self {
            case_id: case_id.into(),
            phenotypes: phenotypes.into(),
            true_disease: true_disease.into(),
        }
    }
}

/// Load cases from a CSV with at least `case_id,phenotypes,true_disease`.
pub fn load_cases(path: impl AsRef<Path>) -> Result<Vec<Case>> {
    read_records(path.as_ref(), "cases", &REQUIRED_COLUMNS)
}
