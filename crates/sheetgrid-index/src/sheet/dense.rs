use sheetgrid_model::MAX_ROWS;

use crate::error::{IndexError, Result};
use crate::row::RowIndexer;
use crate::sheet::{check_row_bounds, wrap_rows, SheetIndexer};
use crate::tree::{Row, SheetData};

/// Slot-vector strategy: slot `i` holds row `i + 1`.
///
/// The vector is grown to the maximum occupied row and kept trimmed so its
/// last slot is always occupied, making the maximum row index the vector
/// length. Indexed access is O(1); shifted insert/remove splice the vector
/// and renumber the suffix.
#[derive(Clone, Debug, Default)]
pub struct DenseSheetIndexer {
    slots: Vec<Option<RowIndexer>>,
    count: usize,
}

impl DenseSheetIndexer {
    pub fn new(sheet: SheetData) -> Result<Self> {
        let wrapped = wrap_rows(sheet)?;
        let count = wrapped.len();
        let mut slots: Vec<Option<RowIndexer>> = Vec::new();
        for row in wrapped {
            let slot = row.index() as usize - 1;
            if slot >= slots.len() {
                slots.resize_with(slot + 1, || None);
            }
            slots[slot] = Some(row);
        }
        Ok(Self { slots, count })
    }

    /// Unwrap into the backing sheet data, rows ascending.
    pub fn into_sheet(self) -> SheetData {
        SheetData {
            rows: self
                .slots
                .into_iter()
                .flatten()
                .map(RowIndexer::into_inner)
                .collect(),
        }
    }

    fn trim_trailing_gaps(&mut self) {
        while matches!(self.slots.last(), Some(None)) {
            self.slots.pop();
        }
    }
}

impl SheetIndexer for DenseSheetIndexer {
    fn count(&self) -> usize {
        self.count
    }

    fn max_row_index(&self) -> Result<u32> {
        if self.count == 0 {
            return Err(IndexError::EmptySheet);
        }
        // The last slot is always occupied.
        Ok(self.slots.len() as u32)
    }

    fn row(&self, index: u32) -> Result<Option<&RowIndexer>> {
        check_row_bounds(index)?;
        Ok(self
            .slots
            .get(index as usize - 1)
            .and_then(Option::as_ref))
    }

    fn row_mut(&mut self, index: u32) -> Result<Option<&mut RowIndexer>> {
        check_row_bounds(index)?;
        Ok(self
            .slots
            .get_mut(index as usize - 1)
            .and_then(Option::as_mut))
    }

    fn rows(&self) -> Box<dyn Iterator<Item = &RowIndexer> + '_> {
        Box::new(self.slots.iter().filter_map(Option::as_ref))
    }

    fn insert_row(&mut self, row: Row, index: u32, shift_down: bool) -> Result<()> {
        check_row_bounds(index)?;
        let slot = index as usize - 1;
        let appending = slot >= self.slots.len();
        if !appending && shift_down && self.slots.len() as u32 >= MAX_ROWS {
            return Err(IndexError::CapacityExceeded { max: MAX_ROWS });
        }

        let mut wrapped = RowIndexer::new(row)?;
        wrapped.renumber(index)?;

        if appending {
            self.slots.resize_with(slot, || None);
            self.slots.push(Some(wrapped));
            self.count += 1;
        } else if shift_down {
            self.slots.insert(slot, Some(wrapped));
            self.count += 1;
            for pos in slot + 1..self.slots.len() {
                if let Some(shifted) = &mut self.slots[pos] {
                    shifted.renumber(pos as u32 + 1)?;
                }
            }
        } else {
            let replaced = self.slots[slot].replace(wrapped);
            if replaced.is_none() {
                self.count += 1;
            }
        }
        Ok(())
    }

    fn remove_row(&mut self, index: u32, shift_up: bool) -> Result<bool> {
        check_row_bounds(index)?;
        let slot = index as usize - 1;
        if slot >= self.slots.len() || self.slots[slot].is_none() {
            return Ok(false);
        }

        if shift_up {
            self.slots.remove(slot);
            for pos in slot..self.slots.len() {
                if let Some(shifted) = &mut self.slots[pos] {
                    shifted.renumber(pos as u32 + 1)?;
                }
            }
        } else {
            self.slots[slot] = None;
        }
        self.count -= 1;
        self.trim_trailing_gaps();
        Ok(true)
    }

    fn into_inner(self: Box<Self>) -> SheetData {
        self.into_sheet()
    }
}
