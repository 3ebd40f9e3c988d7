use thiserror::Error;

/// Main error type for elbench
#[derive(Error, Debug)]
pub enum ElbenchError {
    /// File system I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV input or output
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Tabular source is missing required columns
    #[error("Missing columns in {source_kind} CSV: {}", .columns.join(", "))]
    MissingColumns {
        source_kind: &'static str,
        columns: Vec<String>,
    },

    /// A ranking row carried a rank below 1
    #[error("Invalid rank {rank} for case {case_id} / candidate {candidate}: ranks start at 1")]
    InvalidRank {
        case_id: String,
        candidate: String,
        rank: i64,
    },

    /// Chat completion API errors
    #[error("LLM API error: {0}")]
    Llm(String),
}

/// Convenient Result type using ElbenchError
pub type Result<T> = std::result::Result<T, ElbenchError>;
