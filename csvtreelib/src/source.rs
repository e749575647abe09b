//! Row loading: read a CSV source into ordered field mappings.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::CsvTreeError;
use crate::Result;

/// One data row: column name to cell value.
///
/// A column missing from the map is different from an empty cell. Short
/// records leave their trailing columns out entirely.
pub type Row = BTreeMap<String, String>;

/// Rows of a tabular source together with its header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowSet {
    /// Header names in source order
    pub columns: Vec<String>,
    /// Data rows in source order
    pub rows: Vec<Row>,
}

impl RowSet {
    /// Parse CSV data (with a header line) from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                if idx == 0 {
                    name.trim_start_matches('\u{feff}').to_string()
                } else {
                    name.to_string()
                }
            })
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let row: Row = columns
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.clone(), value.to_string()))
                .collect();
            rows.push(row);
        }

        debug!(columns = columns.len(), rows = rows.len(), "loaded CSV data");
        Ok(Self { columns, rows })
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Read a CSV file from disk.
///
/// A path that is not an existing file is reported as
/// [`CsvTreeError::PathNotFound`] before anything is opened.
#[instrument(level = "debug", skip_all, fields(path = %path.as_ref().display()))]
pub fn read_csv(path: impl AsRef<Path>) -> Result<RowSet> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CsvTreeError::PathNotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| CsvTreeError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    RowSet::from_reader(file)
}
