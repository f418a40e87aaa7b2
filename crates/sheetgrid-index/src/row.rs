use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use regex::Regex;
use sheetgrid_model::{column_index_of, row_index_of, RefParseError, MAX_COLUMNS, MAX_ROWS};

use crate::cell::CellIndexer;
use crate::error::{IndexError, Result};
use crate::tree::Row;

/// Column-letter capture used when splicing a new row number into a cell
/// reference. The column group is preserved verbatim (uppercased); only the
/// row digits are rewritten.
fn row_splice_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(?P<col>[A-Z]{1,3})[0-9]+$").expect("valid regex"))
}

/// A column-indexed view over one row's cells.
///
/// Built in a single pass over the backing [`Row`]. Cells are keyed by
/// their parsed column index; the maximum column is the last cell seen,
/// since cells are assumed to arrive in ascending column order (no sort is
/// performed, unlike the sheet level).
#[derive(Clone, Debug)]
pub struct RowIndexer {
    index: u32,
    cells: HashMap<u32, CellIndexer>,
    max_column_index: Option<u32>,
}

impl RowIndexer {
    /// Build the view, validating every reference as a complete
    /// single-cell reference with an in-range row and column.
    ///
    /// Validation happens up front so that later renumbering can never
    /// fail halfway through a shift: a reference without row digits (or
    /// outside the grid) is rejected here, not when rows move.
    pub fn new(row: Row) -> Result<Self> {
        let index = row.index;
        let mut cells = HashMap::with_capacity(row.cells.len());
        let mut max_column_index = None;
        for cell in row.cells {
            let column = column_index_of(&cell.reference, true).ok_or_else(|| {
                IndexError::InvalidReference(RefParseError::Malformed(cell.reference.clone()))
            })?;
            if column > MAX_COLUMNS {
                return Err(IndexError::InvalidReference(RefParseError::InvalidColumn));
            }
            match row_index_of(&cell.reference) {
                Some(r) if (1..=MAX_ROWS).contains(&r) => {}
                _ => return Err(IndexError::InvalidReference(RefParseError::InvalidRow)),
            }
            let reference = cell.reference.clone();
            if cells.insert(column, CellIndexer::new(cell)).is_some() {
                return Err(IndexError::DuplicateReference {
                    reference,
                    row: index,
                });
            }
            max_column_index = Some(column);
        }
        Ok(Self {
            index,
            cells,
            max_column_index,
        })
    }

    /// The row's 1-based index. Reassigned when rows shift.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Largest column index seen; errors when the row has no cells.
    pub fn max_column_index(&self) -> Result<u32> {
        self.max_column_index.ok_or(IndexError::EmptyRow)
    }

    /// Look up a cell by 1-based column index.
    ///
    /// Absence is sparse, not an error: `Ok(None)` for an unoccupied column
    /// inside bounds.
    pub fn cell(&self, column: u32) -> Result<Option<&CellIndexer>> {
        check_column_bounds(column)?;
        Ok(self.cells.get(&column))
    }

    /// Mutable variant of [`cell`](Self::cell).
    pub fn cell_mut(&mut self, column: u32) -> Result<Option<&mut CellIndexer>> {
        check_column_bounds(column)?;
        Ok(self.cells.get_mut(&column))
    }

    /// Look up a cell by column name. Trailing digits are tolerated and
    /// ignored (`C` and `C6` address the same column); an unparseable name
    /// is an error.
    pub fn cell_by_name(&self, name: &str) -> Result<Option<&CellIndexer>> {
        let column = column_index_of(name, false).ok_or_else(|| {
            IndexError::InvalidReference(RefParseError::Malformed(name.to_string()))
        })?;
        self.cell(column)
    }

    /// The row's cells in ascending column order.
    pub fn cells(&self) -> impl Iterator<Item = &CellIndexer> {
        let mut columns: Vec<u32> = self.cells.keys().copied().collect();
        columns.sort_unstable();
        columns.into_iter().filter_map(move |c| self.cells.get(&c))
    }

    /// Reassign the row's index and resynchronize every cell reference.
    ///
    /// Each reference is rewritten by splicing `new_index` in place of the
    /// old row digits, preserving the captured column letters. Afterwards
    /// the row is validated: a duplicate reference or a reference whose row
    /// part disagrees with `new_index` means the caller corrupted the
    /// backing row, surfaced as an unrecoverable invalid-state error.
    ///
    /// Crate-internal: rows stored inside a sheet indexer are keyed by
    /// index, so only the shift algorithm may renumber them.
    pub(crate) fn renumber(&mut self, new_index: u32) -> Result<()> {
        for cell in self.cells.values_mut() {
            let caps = row_splice_re().captures(cell.reference()).ok_or_else(|| {
                IndexError::InvalidReference(RefParseError::Malformed(
                    cell.reference().to_string(),
                ))
            })?;
            let column = caps["col"].to_ascii_uppercase();
            cell.set_reference(format!("{column}{new_index}"));
        }
        self.index = new_index;
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.cells.len());
        for (column, cell) in &self.cells {
            let reference = cell.reference();
            if row_index_of(reference) != Some(self.index)
                || column_index_of(reference, true) != Some(*column)
            {
                return Err(IndexError::MisalignedReference {
                    reference: reference.to_string(),
                    row: self.index,
                });
            }
            if !seen.insert(reference.to_ascii_uppercase()) {
                return Err(IndexError::DuplicateReference {
                    reference: reference.to_string(),
                    row: self.index,
                });
            }
        }
        Ok(())
    }

    /// Deep-copy the backing row, cells ascending by column.
    pub fn to_row(&self) -> Row {
        Row {
            index: self.index,
            cells: self.cells().map(|c| c.inner().clone()).collect(),
        }
    }

    /// Unwrap into the backing row, cells ascending by column.
    pub fn into_inner(mut self) -> Row {
        let index = self.index;
        let mut entries: Vec<(u32, CellIndexer)> = self.cells.drain().collect();
        entries.sort_unstable_by_key(|(column, _)| *column);
        Row {
            index,
            cells: entries
                .into_iter()
                .map(|(_, cell)| cell.into_inner())
                .collect(),
        }
    }
}

fn check_column_bounds(column: u32) -> Result<()> {
    if column == 0 || column > MAX_COLUMNS {
        return Err(IndexError::ColumnOutOfBounds {
            index: column,
            max: MAX_COLUMNS,
        });
    }
    Ok(())
}
