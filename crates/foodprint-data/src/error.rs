//! Error types for dataset loading.

use std::path::PathBuf;

/// Errors that can occur while loading the source tables.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// I/O error reading a data file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV deserialization error.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A required data file is missing.
    #[error("data file not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A row violated a schema invariant.
    #[error("invalid row {row} in {table}: {detail}")]
    InvalidRow {
        /// Table the row came from (file stem).
        table: &'static str,
        /// 1-based record number within the file.
        row: usize,
        /// Description of the violation.
        detail: String,
    },
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DataError>;
