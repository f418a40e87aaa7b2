//! Sheet-data indexing: one contract, three storage strategies.
//!
//! All strategies satisfy [`SheetIndexer`] with identical observable
//! behavior; they differ only in how the row slots are stored and what the
//! positional operations cost. The strategy is a caller-selected
//! configuration, not an inheritance hierarchy.

mod dense;
mod list;
mod map;

use serde::{Deserialize, Serialize};
use sheetgrid_model::MAX_ROWS;

pub use dense::DenseSheetIndexer;
pub use list::ListSheetIndexer;
pub use map::MapSheetIndexer;

use crate::error::{IndexError, Result};
use crate::row::RowIndexer;
use crate::tree::{Row, SheetData};

/// Storage strategy for a sheet indexer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Contiguous slot vector indexed by row; O(1) access, memory
    /// proportional to the maximum occupied row.
    Dense,
    /// Hash map keyed by row index; O(1) amortized access, memory
    /// proportional to occupied rows.
    #[default]
    Map,
    /// Position-ordered list; O(n) to locate a row, cheap splice once
    /// located.
    List,
}

/// Build an indexer over `sheet` with the requested storage strategy.
pub fn build(sheet: SheetData, strategy: Strategy) -> Result<Box<dyn SheetIndexer>> {
    Ok(match strategy {
        Strategy::Dense => Box::new(DenseSheetIndexer::new(sheet)?),
        Strategy::Map => Box::new(MapSheetIndexer::new(sheet)?),
        Strategy::List => Box::new(ListSheetIndexer::new(sheet)?),
    })
}

/// Row-indexed access and mutation over sheet data.
///
/// Occupied row indices always lie in `1..=MAX_ROWS`; [`rows`](Self::rows)
/// yields a fresh, strictly ascending pass on every call. Every mutating
/// operation validates its arguments before touching any state, so a
/// failed call leaves the indexer unchanged.
pub trait SheetIndexer {
    /// Number of occupied rows.
    fn count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Largest occupied row index; errors when the sheet is empty.
    fn max_row_index(&self) -> Result<u32>;

    /// Look up a row by 1-based index. Absence inside bounds is sparse,
    /// not an error.
    fn row(&self, index: u32) -> Result<Option<&RowIndexer>>;

    /// Mutable variant of [`row`](Self::row), for in-place cell edits.
    fn row_mut(&mut self, index: u32) -> Result<Option<&mut RowIndexer>>;

    /// The occupied rows in strictly ascending row-index order.
    fn rows(&self) -> Box<dyn Iterator<Item = &RowIndexer> + '_>;

    /// Insert a row. The row is renumbered to `index` (every cell
    /// reference resynchronized) before placement.
    ///
    /// - `index` past the current maximum appends.
    /// - `shift_down` renumbers every row at-or-after `index` one higher
    ///   to free the slot.
    /// - otherwise an occupied slot is replaced in place; an unoccupied
    ///   one is filled without disturbing its neighbors.
    fn insert_row(&mut self, row: Row, index: u32, shift_down: bool) -> Result<()>;

    /// Remove the row at `index`, returning whether one was present.
    ///
    /// With `shift_up`, every subsequent row is renumbered one lower;
    /// without it the gap is left in place. Either way the maximum row
    /// index is recomputed from the surviving rows.
    fn remove_row(&mut self, index: u32, shift_up: bool) -> Result<bool>;

    /// Insert immediately after the current last row (at row 1 when
    /// empty).
    fn append_row(&mut self, row: Row) -> Result<()> {
        let target = if self.is_empty() {
            1
        } else {
            let max = self.max_row_index()?;
            if max >= MAX_ROWS {
                return Err(IndexError::CapacityExceeded { max: MAX_ROWS });
            }
            max + 1
        };
        self.insert_row(row, target, false)
    }

    /// Deep-copy the backing row at `index`, cells included.
    fn clone_row(&self, index: u32) -> Result<Option<Row>> {
        Ok(self.row(index)?.map(RowIndexer::to_row))
    }

    /// Unwrap into the backing sheet data, rows ascending.
    fn into_inner(self: Box<Self>) -> SheetData;
}

/// Bounds check shared by every strategy: valid row indices are
/// `1..=MAX_ROWS`.
pub(crate) fn check_row_bounds(index: u32) -> Result<()> {
    if index == 0 || index > MAX_ROWS {
        return Err(IndexError::RowOutOfBounds {
            index,
            max: MAX_ROWS,
        });
    }
    Ok(())
}

/// Wrap and order the raw rows at construction time.
///
/// Rows are sorted by index; when the input carries the same index twice,
/// the later entry wins (matching in-place replacement semantics).
pub(crate) fn wrap_rows(sheet: SheetData) -> Result<Vec<RowIndexer>> {
    let mut wrapped = Vec::with_capacity(sheet.rows.len());
    for row in sheet.rows {
        check_row_bounds(row.index)?;
        wrapped.push(RowIndexer::new(row)?);
    }
    wrapped.sort_by_key(RowIndexer::index);
    // Stable sort keeps input order among equal indices; keep the last.
    wrapped.dedup_by(|later, earlier| {
        if later.index() == earlier.index() {
            std::mem::swap(later, earlier);
            true
        } else {
            false
        }
    });
    Ok(wrapped)
}
