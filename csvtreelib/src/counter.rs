//! Child counting over the implicit tree.
//!
//! Rows arrive in depth-first order and carry no parent reference; the
//! tree is rebuilt from levels alone with a stack holding, per open level,
//! the row that currently owns it.

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::error::CsvTreeError;
use crate::hierarchy::NODES_COLUMN;
use crate::level::{describe_row, resolve_levels, LeveledRow};
use crate::options::CountOptions;
use crate::output::TextTable;
use crate::source::{Row, RowSet};
use crate::Result;

/// Positions of the rows owning each open level.
///
/// Slot `i` holds the latest row at level `i` not yet closed by a row at a
/// level `<= i`. Its length is always the last placed level plus one.
#[derive(Debug, Default)]
struct ParentStack {
    slots: Vec<usize>,
}

impl ParentStack {
    /// Number of open levels.
    fn depth(&self) -> usize {
        self.slots.len()
    }

    /// Open `level` with the row at `position`, closing every deeper level.
    ///
    /// Returns the position of the parent row, if any. The caller must have
    /// checked `level <= self.depth()`.
    fn place(&mut self, level: usize, position: usize) -> Option<usize> {
        if level == self.slots.len() {
            self.slots.push(position);
        } else {
            self.slots.truncate(level + 1);
            self.slots[level] = position;
        }

        level.checked_sub(1).map(|parent_level| self.slots[parent_level])
    }
}

/// Count the direct children of every row.
///
/// Counters are reset first, so repeated passes over the same rows give the
/// same result. Fails on the first row whose level skips past the deepest
/// open level plus one.
pub fn count_children(rows: &mut [LeveledRow<'_>]) -> Result<()> {
    for row in rows.iter_mut() {
        row.children = 0;
    }

    let mut stack = ParentStack::default();

    for position in 0..rows.len() {
        let level = rows[position].level;
        let open_depth = stack.depth();

        if level > open_depth {
            return Err(CsvTreeError::InvalidLevelJump {
                row: rows[position].index,
                context: describe_row(rows[position].row),
                open_depth,
                attempted: level,
            });
        }

        if let Some(parent) = stack.place(level, position) {
            rows[parent].children += 1;
            trace!(
                row = rows[position].index,
                level,
                parent = rows[parent].index,
                "attached row"
            );
        }
    }

    Ok(())
}

/// Cell text for a child count: empty for leaves.
pub fn nodes_cell(children: usize) -> String {
    if children == 0 {
        String::new()
    } else {
        children.to_string()
    }
}

/// Copy each row with its count added under [`NODES_COLUMN`].
///
/// The source rows are left untouched.
pub fn project(rows: &[LeveledRow<'_>]) -> Vec<Row> {
    rows.iter()
        .map(|leveled| {
            let mut row = leveled.row.clone();
            row.insert(NODES_COLUMN.to_string(), nodes_cell(leveled.children));
            row
        })
        .collect()
}

/// Result of counting nodes over a row set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountResult {
    /// Result columns, `nodes` last
    pub columns: Vec<String>,
    /// Source rows with the `nodes` field added, in source order
    pub rows: Vec<Row>,
    /// Direct child count per row
    pub counts: Vec<usize>,
}

impl CountResult {
    /// Cell values per row, following [`CountResult::columns`].
    ///
    /// Columns absent from a row yield empty cells.
    pub fn records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| row.get(column).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Build a text table of the result.
    pub fn to_table(&self) -> TextTable {
        TextTable::new(self.columns.clone(), self.records())
    }
}

/// Resolve levels, count children, and project the counts into the rows.
///
/// This is the main entry point: it either succeeds over the whole row set
/// or fails on the first bad row in input order.
///
/// # Example
///
/// ```rust
/// use csvtreelib::{count_nodes, CountOptions, HierarchySpec, RowSet};
///
/// let data = "A,B\nroot,\n,c1\n,c2\n";
/// let set = RowSet::from_reader(data.as_bytes()).unwrap();
/// let options = CountOptions::new("A,B".parse::<HierarchySpec>().unwrap());
///
/// let result = count_nodes(&set, &options).unwrap();
/// assert_eq!(result.counts, vec![2, 0, 0]);
/// assert_eq!(result.rows[0]["nodes"], "2");
/// ```
#[instrument(level = "debug", skip_all, fields(rows = set.len()))]
pub fn count_nodes(set: &RowSet, options: &CountOptions) -> Result<CountResult> {
    let mut leveled = resolve_levels(&set.rows, &options.hierarchy)?;
    count_children(&mut leveled)?;

    let counts: Vec<usize> = leveled.iter().map(|r| r.children).collect();
    debug!(
        attached = counts.iter().sum::<usize>(),
        "counted children"
    );

    Ok(CountResult {
        columns: options.output_columns(&set.columns),
        rows: project(&leveled),
        counts,
    })
}
