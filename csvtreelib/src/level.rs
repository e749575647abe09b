//! Level resolution: infer each row's depth from its hierarchy columns.

use serde::Serialize;
use tracing::debug;

use crate::error::CsvTreeError;
use crate::hierarchy::HierarchySpec;
use crate::source::Row;
use crate::Result;

/// A source row with its inferred level and child counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeveledRow<'a> {
    /// Position among the data rows
    pub index: usize,
    /// The unmodified source row
    pub row: &'a Row,
    /// Zero-based depth (index of the first filled hierarchy column)
    pub level: usize,
    /// Direct children found so far; final once counting finishes
    pub children: usize,
}

impl<'a> LeveledRow<'a> {
    /// Wrap a row at a known level with no children yet.
    pub fn new(index: usize, row: &'a Row, level: usize) -> Self {
        Self {
            index,
            row,
            level,
            children: 0,
        }
    }
}

/// Determine the level of one row.
///
/// Hierarchy columns are scanned in order and the first non-empty value
/// wins; later columns are not consulted. A column absent from the row is
/// a [`CsvTreeError::MissingColumn`], while an empty cell just means "not
/// this level".
pub fn resolve_level(row: &Row, index: usize, spec: &HierarchySpec) -> Result<usize> {
    for (level, column) in spec.columns().iter().enumerate() {
        match row.get(column) {
            None => {
                return Err(CsvTreeError::MissingColumn {
                    column: column.clone(),
                    row: index,
                    context: describe_row(row),
                })
            }
            Some(value) if value.is_empty() => continue,
            Some(_) => return Ok(level),
        }
    }

    Err(CsvTreeError::AmbiguousOrEmptyLevel { row: index })
}

/// Resolve the level of every row, stopping at the first failure.
pub fn resolve_levels<'a>(rows: &'a [Row], spec: &HierarchySpec) -> Result<Vec<LeveledRow<'a>>> {
    let leveled = rows
        .iter()
        .enumerate()
        .map(|(index, row)| {
            resolve_level(row, index, spec).map(|level| LeveledRow::new(index, row, level))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(rows = leveled.len(), "resolved levels");
    Ok(leveled)
}

/// Row rendering used in error messages.
pub(crate) fn describe_row(row: &Row) -> String {
    format!("{:?}", row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn spec() -> HierarchySpec {
        HierarchySpec::new(["A", "B", "C"]).unwrap()
    }

    #[test]
    fn test_first_filled_column_wins() {
        let spec = spec();
        assert_eq!(
            resolve_level(&row(&[("A", "x"), ("B", ""), ("C", "")]), 0, &spec).unwrap(),
            0
        );
        assert_eq!(
            resolve_level(&row(&[("A", ""), ("B", "y"), ("C", "")]), 0, &spec).unwrap(),
            1
        );
        assert_eq!(
            resolve_level(&row(&[("A", ""), ("B", ""), ("C", "z")]), 0, &spec).unwrap(),
            2
        );
    }

    #[test]
    fn test_later_filled_columns_ignored() {
        let r = row(&[("A", ""), ("B", "y"), ("C", "also")]);
        assert_eq!(resolve_level(&r, 0, &spec()).unwrap(), 1);
    }

    #[test]
    fn test_whitespace_counts_as_value() {
        let r = row(&[("A", " "), ("B", ""), ("C", "")]);
        assert_eq!(resolve_level(&r, 0, &spec()).unwrap(), 0);
    }

    #[test]
    fn test_non_hierarchy_columns_ignored() {
        let r = row(&[("A", ""), ("B", "y"), ("C", ""), ("note", "anything")]);
        assert_eq!(resolve_level(&r, 0, &spec()).unwrap(), 1);
    }

    #[test]
    fn test_all_empty_is_error() {
        let r = row(&[("A", ""), ("B", ""), ("C", "")]);
        let err = resolve_level(&r, 4, &spec()).unwrap_err();
        assert!(matches!(err, CsvTreeError::AmbiguousOrEmptyLevel { row: 4 }));
    }

    #[test]
    fn test_missing_column_is_error() {
        let r = row(&[("A", ""), ("C", "z")]);
        let err = resolve_level(&r, 2, &spec()).unwrap_err();
        match err {
            CsvTreeError::MissingColumn { column, row, .. } => {
                assert_eq!(column, "B");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column_after_match_not_checked() {
        // Scanning stops at the first filled column
        let r = row(&[("A", "x")]);
        assert_eq!(resolve_level(&r, 0, &spec()).unwrap(), 0);
    }

    #[test]
    fn test_resolve_levels_reports_first_bad_row() {
        let rows = vec![
            row(&[("A", "x"), ("B", ""), ("C", "")]),
            row(&[("A", ""), ("B", ""), ("C", "")]),
            row(&[("A", ""), ("B", "")]),
        ];
        let err = resolve_levels(&rows, &spec()).unwrap_err();
        assert!(matches!(err, CsvTreeError::AmbiguousOrEmptyLevel { row: 1 }));
    }

    #[test]
    fn test_resolve_levels_preserves_order() {
        let rows = vec![
            row(&[("A", "x"), ("B", ""), ("C", "")]),
            row(&[("A", ""), ("B", "y"), ("C", "")]),
            row(&[("A", ""), ("B", ""), ("C", "z")]),
        ];
        let leveled = resolve_levels(&rows, &spec()).unwrap();
        let levels: Vec<usize> = leveled.iter().map(|r| r.level).collect();
        let indices: Vec<usize> = leveled.iter().map(|r| r.index).collect();

        assert_eq!(levels, vec![0, 1, 2]);
        assert_eq!(indices, vec![0, 1, 2]);
        assert!(leveled.iter().all(|r| r.children == 0));
    }

    #[test]
    fn test_describe_row() {
        let r = row(&[("B", "y"), ("A", "")]);
        assert_eq!(describe_row(&r), r#"{"A": "", "B": "y"}"#);
    }
}
