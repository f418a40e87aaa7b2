use sheetgrid_model::{column_index_of, column_name_of, row_index_of, RefParseError};

use crate::error::{IndexError, Result};
use crate::tree::Cell;

/// A column-addressed view over one backing [`Cell`].
///
/// The column and row parts are recomputed from the cell's reference string
/// on every access rather than cached, so they stay truthful after the row
/// has been renumbered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellIndexer {
    cell: Cell,
}

impl CellIndexer {
    pub fn new(cell: Cell) -> Self {
        Self { cell }
    }

    /// The raw reference string (e.g. `C6`).
    pub fn reference(&self) -> &str {
        &self.cell.reference
    }

    pub(crate) fn set_reference(&mut self, reference: String) {
        self.cell.reference = reference;
    }

    /// Column letters, uppercased, derived from the reference string.
    pub fn column_name(&self) -> Result<String> {
        column_name_of(&self.cell.reference, false)
            .map(|name| name.to_ascii_uppercase())
            .ok_or_else(|| self.malformed())
    }

    /// 1-based column index derived from the reference string.
    pub fn column_index(&self) -> Result<u32> {
        column_index_of(&self.cell.reference, false).ok_or_else(|| self.malformed())
    }

    /// 1-based row index derived from the reference string.
    pub fn row_index(&self) -> Result<u32> {
        row_index_of(&self.cell.reference).ok_or_else(|| self.malformed())
    }

    pub fn value(&self) -> &str {
        &self.cell.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.cell.value = value.into();
    }

    /// The wrapped backing cell.
    pub fn inner(&self) -> &Cell {
        &self.cell
    }

    /// Unwrap into the backing cell.
    pub fn into_inner(self) -> Cell {
        self.cell
    }

    fn malformed(&self) -> IndexError {
        IndexError::InvalidReference(RefParseError::Malformed(self.cell.reference.clone()))
    }
}
