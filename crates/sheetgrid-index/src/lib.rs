//! `sheetgrid-index` provides random-access, mutation-aware indexing over
//! sheet row/cell data addressed by A1-style references.
//!
//! The centerpiece is the [`SheetIndexer`] contract with three
//! interchangeable storage strategies (slot vector, hash map, ordered
//! list) and the shift/renumbering pass that keeps every embedded cell
//! reference synchronized with its row's position after insertion or
//! deletion. Around it sit the per-row [`RowIndexer`] / [`CellIndexer`]
//! views and a deduplicating [`SharedStringTable`].
//!
//! All types are single-threaded and synchronous; mutation flows only from
//! the indexers into the backing [`tree`] they own.

mod cell;
mod error;
mod row;
pub mod sheet;
mod shared_strings;
pub mod tree;

pub use cell::CellIndexer;
pub use error::{IndexError, Result};
pub use row::RowIndexer;
pub use shared_strings::SharedStringTable;
pub use sheet::{
    build, DenseSheetIndexer, ListSheetIndexer, MapSheetIndexer, SheetIndexer, Strategy,
};
pub use tree::{Cell, Row, SheetData};
