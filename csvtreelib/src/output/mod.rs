//! Output formatting: present counted rows as text.
//!
//! This module handles the final stage of the pipeline. It provides:
//!
//! - **TextTable**: header plus string cells, rendered as padded,
//!   left-aligned columns joined by a delimiter
//!
//! TextTable is a pure presentation layer. It never reorders rows or
//! truncates values.
//!
//! ## Example
//!
//! ```rust
//! use csvtreelib::output::TextTable;
//!
//! let table = TextTable::new(
//!     vec!["A".to_string(), "nodes".to_string()],
//!     vec![vec!["root".to_string(), "2".to_string()]],
//! );
//! assert_eq!(table.render(" | "), "A    | nodes\nroot | 2    ");
//! ```

pub mod table;

pub use table::{TextTable, DEFAULT_DELIMITER};
