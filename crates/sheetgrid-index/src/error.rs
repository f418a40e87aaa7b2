use sheetgrid_model::RefParseError;
use thiserror::Error;

/// Errors raised by the indexing layer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    /// A cell reference string failed to parse (invalid argument).
    #[error("invalid cell reference: {0}")]
    InvalidReference(#[from] RefParseError),

    /// A row index outside `1..=MAX_ROWS`.
    #[error("row index {index} out of bounds (valid range 1..={max})")]
    RowOutOfBounds { index: u32, max: u32 },

    /// A column index outside `1..=MAX_COLUMNS`.
    #[error("column index {index} out of bounds (valid range 1..={max})")]
    ColumnOutOfBounds { index: u32, max: u32 },

    /// The operation would grow the sheet past its row capacity.
    #[error("sheet capacity exceeded (max row would pass {max})")]
    CapacityExceeded { max: u32 },

    /// `max_column_index` was read on a row with no cells.
    #[error("row has no cells")]
    EmptyRow,

    /// `max_row_index` was read on a sheet with no rows.
    #[error("sheet has no rows")]
    EmptySheet,

    /// Two cells in one row resolved to the same reference; this signals
    /// caller-introduced corruption of the backing row.
    #[error("duplicate cell reference {reference} in row {row}")]
    DuplicateReference { reference: String, row: u32 },

    /// A cell reference's row part disagrees with the row's own index
    /// after resynchronization.
    #[error("cell reference {reference} does not match row {row}")]
    MisalignedReference { reference: String, row: u32 },

    /// Exact-key lookup of a string absent from the shared string table.
    #[error("string {0:?} not present in shared string table")]
    StringNotFound(String),

    /// Exact-key lookup of an index absent from the shared string table.
    #[error("index {0} not present in shared string table")]
    IndexNotFound(u32),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IndexError>;
