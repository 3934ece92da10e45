//! Error types for loading and exporting annealer data.

use std::path::PathBuf;

use thiserror::Error;

use ising_stats::StatsError;

/// Result type for loading samples and sample sets.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for QUBO parsing.
pub type QuboResult<T> = Result<T, QuboError>;

/// Result type for tabular exports.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors raised while reading a sample table or sample set.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The input is not well-formed CSV.
    #[error("CSV syntax error: {0}")]
    Csv(#[from] csv::Error),

    /// The input is not well-formed JSON.
    #[error("JSON syntax error: {0}")]
    Json(#[source] serde_json::Error),

    /// A required column is absent from the table header.
    #[error("sample table has no '{0}' column")]
    MissingColumn(String),

    /// A field could not be parsed as a number.
    #[error("row {row}: column '{column}' has non-numeric value '{value}'")]
    Field {
        /// One-based data row.
        row: usize,
        /// Column name.
        column: String,
        /// Offending text.
        value: String,
    },

    /// Well-formed JSON that is not a usable sample set.
    #[error("malformed sample set: {0}")]
    Schema(String),

    /// A row produced an invalid energy record.
    #[error(transparent)]
    Record(#[from] StatsError),
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match e.classify() {
            Category::Data => LoadError::Schema(e.to_string()),
            Category::Io | Category::Syntax | Category::Eof => LoadError::Json(e),
        }
    }
}

/// Errors raised while reading a sparse QUBO file.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuboError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Low-level CSV failure.
    #[error("CSV syntax error: {0}")]
    Csv(#[from] csv::Error),

    /// A row is not of the form `i,j,Qij`.
    #[error("line {line}: {reason}")]
    Row {
        /// One-based line in the file.
        line: u64,
        /// What is wrong with the row.
        reason: String,
    },

    /// An assignment does not cover every variable of the QUBO.
    #[error("assignment has {got} variables but the QUBO references variable {needed}")]
    Assignment {
        /// Highest variable index referenced.
        needed: u64,
        /// Length of the assignment.
        got: usize,
    },
}

/// Errors raised while producing tabular output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// CSV writer failure.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Output stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sample set carries no `info.timing` object.
    #[error("sample set has no 'info.timing' object")]
    MissingTiming,

    /// A requested timing field does not exist.
    #[error("unknown timing field '{field}' (available: {available})")]
    UnknownField {
        /// Requested field.
        field: String,
        /// Comma-separated list of existing fields.
        available: String,
    },

    /// The sample set itself is unusable.
    #[error(transparent)]
    Load(#[from] LoadError),
}
