//! `sheetgrid-model` defines the cell-reference model for the sheetgrid
//! workspace: the one-based A1 coordinate space, bijective base-26 column
//! arithmetic, and validated single-cell / range reference types with
//! containment, extension, resize, and translation operations.
//!
//! The crate is intentionally self-contained so it can be reused by the
//! indexing layer and by serialization boundaries via `serde` (references
//! round-trip as their normalized text).

mod coord;
mod reference;

pub use coord::{column_index, column_name, RefParseError, MAX_COLUMNS, MAX_ROWS};
pub use reference::{
    column_index_of, column_name_of, is_range_cell_reference, is_single_cell_reference,
    is_valid_cell_reference, row_index_of, CellReference, RangeCellReference, SingleCellReference,
};
