//! Input options for node counting.
//!
//! This module contains the configuration types that control which columns
//! are levels and which columns end up in the result.

use serde::Serialize;
use std::str::FromStr;

use crate::hierarchy::{HierarchySpec, NODES_COLUMN};

/// Which source columns appear in the result, before the trailing `nodes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ColumnSelection {
    /// Only the hierarchy columns, in level order
    #[default]
    Hierarchy,
    /// Every source column, in header order
    All,
}

impl FromStr for ColumnSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hierarchy" => Ok(ColumnSelection::Hierarchy),
            "all" => Ok(ColumnSelection::All),
            _ => Err(format!(
                "Invalid column selection: {}. Use 'hierarchy' or 'all'",
                s
            )),
        }
    }
}

/// Options for counting nodes.
#[derive(Debug, Clone)]
pub struct CountOptions {
    /// Hierarchy columns, root level first
    pub hierarchy: HierarchySpec,
    /// Result column selection
    pub columns: ColumnSelection,
}

impl CountOptions {
    /// Create options for a hierarchy with default column selection.
    pub fn new(hierarchy: HierarchySpec) -> Self {
        Self {
            hierarchy,
            columns: ColumnSelection::default(),
        }
    }

    /// Set column selection.
    pub fn columns(mut self, columns: ColumnSelection) -> Self {
        self.columns = columns;
        self
    }

    /// Result columns for a source with the given header, `nodes` last.
    ///
    /// With [`ColumnSelection::All`] a source column already named `nodes`
    /// is dropped; the computed column replaces it.
    pub fn output_columns(&self, source_columns: &[String]) -> Vec<String> {
        let mut columns: Vec<String> = match self.columns {
            ColumnSelection::Hierarchy => self.hierarchy.columns().to_vec(),
            ColumnSelection::All => source_columns
                .iter()
                .filter(|c| c.as_str() != NODES_COLUMN)
                .cloned()
                .collect(),
        };
        columns.push(NODES_COLUMN.to_string());
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Vec<String> {
        ["id", "A", "nodes", "B"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_column_selection_from_str() {
        assert_eq!(
            "hierarchy".parse::<ColumnSelection>().unwrap(),
            ColumnSelection::Hierarchy
        );
        assert_eq!("ALL".parse::<ColumnSelection>().unwrap(), ColumnSelection::All);
        assert!("some".parse::<ColumnSelection>().is_err());
    }

    #[test]
    fn test_hierarchy_columns_by_default() {
        let options = CountOptions::new(HierarchySpec::new(["B", "A"]).unwrap());
        assert_eq!(options.output_columns(&source()), vec!["B", "A", "nodes"]);
    }

    #[test]
    fn test_all_columns_replaces_source_nodes() {
        let options =
            CountOptions::new(HierarchySpec::new(["A", "B"]).unwrap()).columns(ColumnSelection::All);
        assert_eq!(
            options.output_columns(&source()),
            vec!["id", "A", "B", "nodes"]
        );
    }
}
