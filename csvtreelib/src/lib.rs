//! # csvtreelib
//!
//! Rebuilds the tree implied by a flat, hierarchical CSV file and counts the
//! direct children of every row.
//!
//! ## Overview
//!
//! Each row of the input belongs to exactly one level of a fixed column
//! sequence (for example `region, country, city`). A row's level is the
//! index of the first of those columns holding a non-empty value. Rows are
//! in depth-first order, so the tree can be recovered from levels alone:
//!
//! ```text
//! region,country,city
//! Europe,,            <- level 0, 2 children
//! ,France,            <- level 1, 1 child
//! ,,Paris             <- level 2
//! ,Spain,             <- level 1
//! ```
//!
//! The pipeline has four stages:
//!
//! - **Load**: read the CSV into ordered [`Row`]s ([`source`])
//! - **Level**: infer each row's level from its hierarchy columns ([`level`])
//! - **Count**: walk the rows with a parent stack and count children ([`counter`])
//! - **Render**: lay the augmented rows out as a padded text table ([`output`])
//!
//! ## Example
//!
//! ```rust
//! use csvtreelib::{count_nodes, CountOptions, HierarchySpec, RowSet};
//!
//! let data = "region,country,city\nEurope,,\n,France,\n,,Paris\n,Spain,\n";
//! let set = RowSet::from_reader(data.as_bytes()).unwrap();
//!
//! let hierarchy: HierarchySpec = "region,country,city".parse().unwrap();
//! let result = count_nodes(&set, &CountOptions::new(hierarchy)).unwrap();
//!
//! assert_eq!(result.counts, vec![2, 1, 0, 0]);
//! println!("{}", result.to_table());
//! ```

pub mod counter;
pub mod error;
pub mod hierarchy;
pub mod level;
pub mod options;
pub mod output;
pub mod source;

pub use counter::{count_children, count_nodes, nodes_cell, project, CountResult};
pub use error::CsvTreeError;
pub use hierarchy::{HierarchySpec, NODES_COLUMN};
pub use level::{resolve_level, resolve_levels, LeveledRow};
pub use options::{ColumnSelection, CountOptions};
pub use output::{TextTable, DEFAULT_DELIMITER};
pub use source::{read_csv, Row, RowSet};

/// Result type for csvtreelib operations
pub type Result<T> = std::result::Result<T, CsvTreeError>;
