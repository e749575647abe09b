//! Fixed-width text tables.

use console::{measure_text_width, pad_str, Alignment};
use serde::Serialize;
use std::fmt;

/// Separator placed between adjacent cells unless another is requested.
pub const DEFAULT_DELIMITER: &str = " | ";

/// Table-ready string data.
///
/// Every row is expected to have one cell per header; short rows are
/// padded with empty cells and surplus cells are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextTable {
    /// Column headers
    pub headers: Vec<String>,
    /// Data rows, in display order
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    /// Create a table from headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Width of each column: the longest of its header and cells.
    ///
    /// Width is the terminal display width: wide characters take two
    /// columns and ANSI escapes take none.
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| measure_text_width(cell))
                    .fold(measure_text_width(header), usize::max)
            })
            .collect()
    }

    /// Render the header line and one line per row, without a trailing
    /// newline.
    pub fn render(&self, delimiter: &str) -> String {
        let widths = self.column_widths();

        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|cells| format_line(cells, &widths, delimiter))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Pad each cell to its column width and join with the delimiter.
fn format_line(cells: &[String], widths: &[usize], delimiter: &str) -> String {
    widths
        .iter()
        .enumerate()
        .map(|(idx, &width)| {
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            pad_str(cell, width, Alignment::Left, None).into_owned()
        })
        .collect::<Vec<_>>()
        .join(delimiter)
}

impl fmt::Display for TextTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_DELIMITER))
    }
}
