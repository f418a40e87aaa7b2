use sheetgrid_model::MAX_ROWS;

use crate::error::{IndexError, Result};
use crate::row::RowIndexer;
use crate::sheet::{check_row_bounds, wrap_rows, SheetIndexer};
use crate::tree::{Row, SheetData};

/// Position-ordered list strategy.
///
/// Rows are kept in ascending row-index order; positional operations
/// locate the first entry at-or-after the target by linear scan, then
/// splice and renumber the suffix. Lookup is O(n), the splice itself is
/// cheap once located.
#[derive(Clone, Debug, Default)]
pub struct ListSheetIndexer {
    rows: Vec<RowIndexer>,
}

impl ListSheetIndexer {
    pub fn new(sheet: SheetData) -> Result<Self> {
        Ok(Self {
            rows: wrap_rows(sheet)?,
        })
    }

    /// Unwrap into the backing sheet data, rows ascending.
    pub fn into_sheet(self) -> SheetData {
        SheetData {
            rows: self
                .rows
                .into_iter()
                .map(RowIndexer::into_inner)
                .collect(),
        }
    }

    /// Position of the first row at-or-after `index`; `len` when every row
    /// sits before it.
    fn find_at_or_after(&self, index: u32) -> usize {
        self.rows
            .iter()
            .position(|r| r.index() >= index)
            .unwrap_or(self.rows.len())
    }

    fn renumber_suffix(&mut self, from: usize, delta: i64) -> Result<()> {
        for row in &mut self.rows[from..] {
            let renumbered = (i64::from(row.index()) + delta) as u32;
            row.renumber(renumbered)?;
        }
        Ok(())
    }
}

impl SheetIndexer for ListSheetIndexer {
    fn count(&self) -> usize {
        self.rows.len()
    }

    fn max_row_index(&self) -> Result<u32> {
        self.rows
            .last()
            .map(RowIndexer::index)
            .ok_or(IndexError::EmptySheet)
    }

    fn row(&self, index: u32) -> Result<Option<&RowIndexer>> {
        check_row_bounds(index)?;
        let pos = self.find_at_or_after(index);
        Ok(self.rows.get(pos).filter(|r| r.index() == index))
    }

    fn row_mut(&mut self, index: u32) -> Result<Option<&mut RowIndexer>> {
        check_row_bounds(index)?;
        let pos = self.find_at_or_after(index);
        Ok(self.rows.get_mut(pos).filter(|r| r.index() == index))
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &RowIndexer> + '_> {
        Box::new(self.rows.iter())
    }

    fn insert_row(&mut self, row: Row, index: u32, shift_down: bool) -> Result<()> {
        check_row_bounds(index)?;
        let pos = self.find_at_or_after(index);
        let appending = pos == self.rows.len();
        if !appending && shift_down {
            if let Some(last) = self.rows.last() {
                if last.index() >= MAX_ROWS {
                    return Err(IndexError::CapacityExceeded { max: MAX_ROWS });
                }
            }
        }

        let mut wrapped = RowIndexer::new(row)?;
        wrapped.renumber(index)?;

        if appending {
            self.rows.push(wrapped);
        } else if shift_down {
            self.rows.insert(pos, wrapped);
            self.renumber_suffix(pos + 1, 1)?;
        } else if self.rows[pos].index() == index {
            self.rows[pos] = wrapped;
        } else {
            // Splice immediately before the next-higher occupied index.
            self.rows.insert(pos, wrapped);
        }
        Ok(())
    }

    fn remove_row(&mut self, index: u32, shift_up: bool) -> Result<bool> {
        check_row_bounds(index)?;
        let pos = self.find_at_or_after(index);
        if self.rows.get(pos).map(RowIndexer::index) != Some(index) {
            return Ok(false);
        }

        self.rows.remove(pos);
        if shift_up {
            self.renumber_suffix(pos, -1)?;
        }
        Ok(true)
    }

    fn into_inner(self: Box<Self>) -> SheetData {
        self.into_sheet()
    }
}
