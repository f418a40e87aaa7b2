//! The backing sheet tree the indexers wrap.
//!
//! These are thin owned stand-ins for the document-object collaborator the
//! indexing layer was designed around: plain data with no behavior of its
//! own. Indexers take the tree by value, traverse it eagerly at
//! construction, and mutate it in lockstep with every indexed operation;
//! a tree handed to an indexer has no other owner, so it can never drift
//! into a second source of truth.

use serde::{Deserialize, Serialize};

/// One cell: a reference string (e.g. `C6`) and its value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub reference: String,
    pub value: String,
}

impl Cell {
    pub fn new(reference: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            value: value.into(),
        }
    }
}

/// One row: a 1-based index and its cells, ascending by column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub index: u32,
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(index: u32) -> Self {
        Self {
            index,
            cells: Vec::new(),
        }
    }

    pub fn with_cells(index: u32, cells: Vec<Cell>) -> Self {
        Self { index, cells }
    }
}

/// Sheet data: the row collection a sheet indexer wraps.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetData {
    pub rows: Vec<Row>,
}

impl SheetData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}
