use std::collections::HashMap;

use sheetgrid_model::MAX_ROWS;

use crate::error::{IndexError, Result};
use crate::row::RowIndexer;
use crate::sheet::{check_row_bounds, wrap_rows, SheetIndexer};
use crate::tree::{Row, SheetData};

/// Hash-map strategy: rows keyed by index, maximum cached.
///
/// Memory is proportional to the occupied rows; access is O(1) amortized.
/// Iteration sorts the occupied indices per pass; shifts re-key the
/// affected suffix.
#[derive(Clone, Debug, Default)]
pub struct MapSheetIndexer {
    rows: HashMap<u32, RowIndexer>,
    max_row: Option<u32>,
}

impl MapSheetIndexer {
    pub fn new(sheet: SheetData) -> Result<Self> {
        let wrapped = wrap_rows(sheet)?;
        let max_row = wrapped.last().map(RowIndexer::index);
        let rows = wrapped.into_iter().map(|r| (r.index(), r)).collect();
        Ok(Self { rows, max_row })
    }

    /// Unwrap into the backing sheet data, rows ascending.
    pub fn into_sheet(mut self) -> SheetData {
        let mut rows: Vec<RowIndexer> = self.rows.drain().map(|(_, row)| row).collect();
        rows.sort_by_key(RowIndexer::index);
        SheetData {
            rows: rows.into_iter().map(RowIndexer::into_inner).collect(),
        }
    }

    fn occupied_ascending(&self) -> Vec<u32> {
        let mut indices: Vec<u32> = self.rows.keys().copied().collect();
        indices.sort_unstable();
        indices
    }
}

impl SheetIndexer for MapSheetIndexer {
    fn count(&self) -> usize {
        self.rows.len()
    }

    fn max_row_index(&self) -> Result<u32> {
        self.max_row.ok_or(IndexError::EmptySheet)
    }

    fn row(&self, index: u32) -> Result<Option<&RowIndexer>> {
        check_row_bounds(index)?;
        Ok(self.rows.get(&index))
    }

    fn row_mut(&mut self, index: u32) -> Result<Option<&mut RowIndexer>> {
        check_row_bounds(index)?;
        Ok(self.rows.get_mut(&index))
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &RowIndexer> + '_> {
        Box::new(
            self.occupied_ascending()
                .into_iter()
                .filter_map(move |i| self.rows.get(&i)),
        )
    }

    fn insert_row(&mut self, row: Row, index: u32, shift_down: bool) -> Result<()> {
        check_row_bounds(index)?;
        let max = self.max_row.unwrap_or(0);
        let appending = self.rows.is_empty() || index > max;
        if !appending && shift_down && max >= MAX_ROWS {
            return Err(IndexError::CapacityExceeded { max: MAX_ROWS });
        }

        let mut wrapped = RowIndexer::new(row)?;
        wrapped.renumber(index)?;

        if appending {
            self.rows.insert(index, wrapped);
            self.max_row = Some(index);
        } else if shift_down {
            // Re-key from the highest index down so slots never collide.
            let mut shifted: Vec<u32> = self
                .rows
                .keys()
                .copied()
                .filter(|&i| i >= index)
                .collect();
            shifted.sort_unstable_by(|a, b| b.cmp(a));
            for i in shifted {
                if let Some(mut moved) = self.rows.remove(&i) {
                    moved.renumber(i + 1)?;
                    self.rows.insert(i + 1, moved);
                }
            }
            self.rows.insert(index, wrapped);
            self.max_row = Some(max + 1);
        } else {
            // Replaces in place when occupied; fills the gap otherwise.
            self.rows.insert(index, wrapped);
        }
        Ok(())
    }

    fn remove_row(&mut self, index: u32, shift_up: bool) -> Result<bool> {
        check_row_bounds(index)?;
        if self.rows.remove(&index).is_none() {
            return Ok(false);
        }

        if shift_up {
            let mut shifted: Vec<u32> = self
                .rows
                .keys()
                .copied()
                .filter(|&i| i > index)
                .collect();
            shifted.sort_unstable();
            for i in shifted {
                if let Some(mut moved) = self.rows.remove(&i) {
                    moved.renumber(i - 1)?;
                    self.rows.insert(i - 1, moved);
                }
            }
        }
        self.max_row = self.rows.keys().max().copied();
        Ok(true)
    }

    fn into_inner(self: Box<Self>) -> SheetData {
        self.into_sheet()
    }
}
