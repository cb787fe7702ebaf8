use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ReportError> = std::result::Result<T, E>;

/// Errors that occur while loading a results table or rendering from it.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The results file does not exist.
    #[error("results file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The results file exists but couldn't be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV structure.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// A column required by the requested operation is absent from the header.
    #[error("missing column \"{column}\"")]
    MissingColumn { column: &'static str },

    /// A cell couldn't be coerced to the column's type.
    #[error("row {row}: invalid {column} value \"{value}\"")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
}
