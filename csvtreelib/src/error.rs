//! Error types for csvtreelib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, leveling, or counting rows.
///
/// Row indices are zero-based positions among the data rows (the header
/// is not counted).
#[derive(Error, Debug)]
pub enum CsvTreeError {
    /// The reserved output column was named in the hierarchy
    #[error("column '{0}' is reserved and cannot be used in the hierarchy definition")]
    ReservedColumn(String),

    /// A hierarchy column was listed more than once
    #[error("column '{0}' appears more than once in the hierarchy definition")]
    DuplicateColumn(String),

    /// No hierarchy columns were given
    #[error("hierarchy definition is empty")]
    EmptyHierarchy,

    /// A hierarchy entry was blank (e.g. "A,,B")
    #[error("hierarchy definition contains an empty column name at position {0}")]
    EmptyColumnName(usize),

    /// Input path does not exist
    #[error("CSV file '{0}' does not exist")]
    PathNotFound(PathBuf),

    /// Failed to open the input file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A configured hierarchy column is absent from a row
    #[error("column '{column}' not found in row {row} ({context})")]
    MissingColumn {
        column: String,
        row: usize,
        context: String,
    },

    /// None of the hierarchy columns hold a value
    #[error("row {row} has no value in any hierarchy column")]
    AmbiguousOrEmptyLevel { row: usize },

    /// A row opens a level more than one deeper than the deepest open level
    #[error(
        "invalid tree structure at row {row} ({context}): \
         level {attempted} cannot follow {open_depth} open level(s)"
    )]
    InvalidLevelJump {
        row: usize,
        context: String,
        /// Number of levels open when the row was reached (max open level + 1)
        open_depth: usize,
        attempted: usize,
    },
}

impl CsvTreeError {
    /// True for errors detected before any row is read: bad hierarchy
    /// definitions and missing input paths.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CsvTreeError::ReservedColumn(_)
                | CsvTreeError::DuplicateColumn(_)
                | CsvTreeError::EmptyHierarchy
                | CsvTreeError::EmptyColumnName(_)
                | CsvTreeError::PathNotFound(_)
        )
    }
}
