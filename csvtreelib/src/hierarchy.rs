//! Ordered hierarchy column definitions.
//!
//! A [`HierarchySpec`] lists the columns whose fill pattern encodes a row's
//! depth, top level first. Index 0 is the root level.

use serde::Serialize;
use std::str::FromStr;

use crate::error::CsvTreeError;
use crate::Result;

/// Name of the computed child-count column.
///
/// It can never be part of a hierarchy since the counter writes it.
pub const NODES_COLUMN: &str = "nodes";

/// Ordered list of hierarchy column names, root level first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HierarchySpec {
    columns: Vec<String>,
}

impl HierarchySpec {
    /// Build a spec from column names, validating it.
    ///
    /// Fails when the list is empty, when a name is blank or repeated, or
    /// when it contains the reserved [`NODES_COLUMN`].
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();

        if columns.is_empty() {
            return Err(CsvTreeError::EmptyHierarchy);
        }

        for (idx, name) in columns.iter().enumerate() {
            if name.is_empty() {
                return Err(CsvTreeError::EmptyColumnName(idx));
            }
            if name == NODES_COLUMN {
                return Err(CsvTreeError::ReservedColumn(name.clone()));
            }
            if columns[..idx].contains(name) {
                return Err(CsvTreeError::DuplicateColumn(name.clone()));
            }
        }

        Ok(Self { columns })
    }

    /// Column names in level order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

impl FromStr for HierarchySpec {
    type Err = CsvTreeError;

    /// Parse a comma-separated list such as `"region,country,city"`.
    ///
    /// Whitespace around each name is trimmed.
    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(CsvTreeError::EmptyHierarchy);
        }
        Self::new(s.split(',').map(str::trim))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_separated() {
        let spec: HierarchySpec = "A,B,C".parse().unwrap();
        assert_eq!(spec.columns(), &["A", "B", "C"]);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let spec: HierarchySpec = " region , country ".parse().unwrap();
        assert_eq!(spec.columns(), &["region", "country"]);
    }

    #[test]
    fn test_reserved_column_rejected() {
        let err = "A,nodes".parse::<HierarchySpec>().unwrap_err();
        assert!(matches!(err, CsvTreeError::ReservedColumn(ref c) if c == "nodes"));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_names_containing_nodes_are_allowed() {
        let spec: HierarchySpec = "subnodes,nodes_old".parse().unwrap();
        assert_eq!(spec.columns(), &["subnodes", "nodes_old"]);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = HierarchySpec::new(["A", "B", "A"]).unwrap_err();
        assert!(matches!(err, CsvTreeError::DuplicateColumn(ref c) if c == "A"));
    }

    #[test]
    fn test_empty_definitions_rejected() {
        assert!(matches!(
            "".parse::<HierarchySpec>(),
            Err(CsvTreeError::EmptyHierarchy)
        ));
        assert!(matches!(
            HierarchySpec::new(Vec::<String>::new()),
            Err(CsvTreeError::EmptyHierarchy)
        ));
        assert!(matches!(
            "A,,B".parse::<HierarchySpec>(),
            Err(CsvTreeError::EmptyColumnName(1))
        ));
    }
}
