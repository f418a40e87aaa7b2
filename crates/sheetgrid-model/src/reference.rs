use core::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::coord::{self, RefParseError, MAX_COLUMNS, MAX_ROWS};

fn single_cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?P<col>[A-Z]{1,3})(?P<row>[0-9]+)$").expect("valid regex")
    })
}

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^(?P<s>[A-Z]{1,3}[0-9]+):(?P<e>[A-Z]{1,3}[0-9]+)$").expect("valid regex")
    })
}

fn column_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(?P<col>[A-Z]{1,3})[0-9]*$").expect("valid regex"))
}

/// Returns true if `s` matches the single-cell pattern (e.g. `C6`).
pub fn is_single_cell_reference(s: &str) -> bool {
    single_cell_re().is_match(s)
}

/// Returns true if `s` matches the range pattern (e.g. `A1:C4`).
pub fn is_range_cell_reference(s: &str) -> bool {
    range_re().is_match(s)
}

/// Returns true if `s` is either a single-cell or a range reference.
pub fn is_valid_cell_reference(s: &str) -> bool {
    is_single_cell_reference(s) || is_range_cell_reference(s)
}

/// Extract the column letters from a reference string.
///
/// In strict mode the letters must be followed by a row number (`C6`); in
/// non-strict mode a bare column name is accepted and trailing digits are
/// tolerated and ignored (`C` and `C6` both yield `C`).
pub fn column_name_of(s: &str, strict: bool) -> Option<&str> {
    let re = if strict { single_cell_re() } else { column_prefix_re() };
    re.captures(s)
        .and_then(|caps| caps.name("col"))
        .map(|m| m.as_str())
}

/// Extract the column letters from a reference string and convert them to a
/// 1-based column index. See [`column_name_of`] for strictness.
pub fn column_index_of(s: &str, strict: bool) -> Option<u32> {
    column_name_of(s, strict).and_then(|name| coord::column_index(name).ok())
}

/// Extract the row number from a strict single-cell reference string.
pub fn row_index_of(s: &str) -> Option<u32> {
    single_cell_re()
        .captures(s)?
        .name("row")?
        .as_str()
        .parse()
        .ok()
}

/// A validated reference to a single cell (e.g. `C6`).
///
/// Text is normalized to uppercase at construction; the type is immutable
/// once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SingleCellReference {
    value: String,
    column_name: String,
    column_index: u32,
    row_index: u32,
}

impl SingleCellReference {
    /// Parse a single-cell reference, failing on empty or malformed input.
    ///
    /// Rows must lie in `1..=MAX_ROWS`.
    pub fn parse(s: &str) -> Result<Self, RefParseError> {
        if s.is_empty() {
            return Err(RefParseError::Empty);
        }
        let caps = single_cell_re()
            .captures(s)
            .ok_or_else(|| RefParseError::Malformed(s.to_string()))?;
        let column_name = caps["col"].to_ascii_uppercase();
        let column_index = coord::column_index(&column_name)?;
        let row_index: u32 = caps["row"].parse().map_err(|_| RefParseError::InvalidRow)?;
        if row_index == 0 || row_index > MAX_ROWS {
            return Err(RefParseError::InvalidRow);
        }
        Ok(Self {
            value: format!("{column_name}{row_index}"),
            column_name,
            column_index,
            row_index,
        })
    }

    fn from_parts(column_index: u32, row_index: u32) -> Self {
        let column_name =
            coord::column_name(column_index).expect("callers clamp column indices to >= 1");
        Self {
            value: format!("{column_name}{row_index}"),
            column_name,
            column_index,
            row_index,
        }
    }

    /// The normalized reference text (e.g. `C6`).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Column letters (e.g. `C`).
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    /// 1-based column index.
    #[inline]
    pub fn column_index(&self) -> u32 {
        self.column_index
    }

    /// 1-based row index.
    #[inline]
    pub fn row_index(&self) -> u32 {
        self.row_index
    }

    /// True only for exact (case-insensitive) value equality with another
    /// single-cell reference.
    pub fn contains_or_subsumes(&self, other: &CellReference) -> bool {
        match other {
            CellReference::Single(cell) => self.value == cell.value,
            CellReference::Range(_) => false,
        }
    }

    /// Extend the reference horizontally by `by` columns.
    ///
    /// Returns the same single cell when `by == 0` or the extension would
    /// land before column 1; otherwise a range spanning the original and
    /// the shifted cell. The shifted column is capped at [`MAX_COLUMNS`].
    pub fn extend_column_range(&self, by: i64) -> CellReference {
        let target = (i64::from(self.column_index) + by).min(i64::from(MAX_COLUMNS));
        if by == 0 || target < 1 || target as u32 == self.column_index {
            return CellReference::Single(self.clone());
        }
        let shifted = Self::from_parts(target as u32, self.row_index);
        CellReference::Range(RangeCellReference::from_corners(self.clone(), shifted))
    }

    /// Extend the reference vertically by `by` rows. Same clamping rules as
    /// [`extend_column_range`](Self::extend_column_range), capped at
    /// [`MAX_ROWS`].
    pub fn extend_row_range(&self, by: i64) -> CellReference {
        let target = (i64::from(self.row_index) + by).min(i64::from(MAX_ROWS));
        if by == 0 || target < 1 || target as u32 == self.row_index {
            return CellReference::Single(self.clone());
        }
        let shifted = Self::from_parts(self.column_index, target as u32);
        CellReference::Range(RangeCellReference::from_corners(self.clone(), shifted))
    }
}

impl fmt::Display for SingleCellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for SingleCellReference {
    type Error = RefParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<SingleCellReference> for String {
    fn from(r: SingleCellReference) -> Self {
        r.value
    }
}

/// A validated rectangular range reference (e.g. `A1:C4`).
///
/// Corners are normalized per axis so that `start <= end` in both row and
/// column.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RangeCellReference {
    value: String,
    start: SingleCellReference,
    end: SingleCellReference,
}

impl RangeCellReference {
    /// Parse a range reference, failing on empty or malformed input.
    pub fn parse(s: &str) -> Result<Self, RefParseError> {
        if s.is_empty() {
            return Err(RefParseError::Empty);
        }
        let caps = range_re()
            .captures(s)
            .ok_or_else(|| RefParseError::Malformed(s.to_string()))?;
        let start = SingleCellReference::parse(&caps["s"])?;
        let end = SingleCellReference::parse(&caps["e"])?;
        Ok(Self::from_corners(start, end))
    }

    fn from_corners(a: SingleCellReference, b: SingleCellReference) -> Self {
        let (start_col, end_col) = if a.column_index <= b.column_index {
            (a.column_index, b.column_index)
        } else {
            (b.column_index, a.column_index)
        };
        let (start_row, end_row) = if a.row_index <= b.row_index {
            (a.row_index, b.row_index)
        } else {
            (b.row_index, a.row_index)
        };
        let start = SingleCellReference::from_parts(start_col, start_row);
        let end = SingleCellReference::from_parts(end_col, end_row);
        let value = format!("{}:{}", start.value, end.value);
        Self { value, start, end }
    }

    /// The normalized reference text (e.g. `A1:C4`).
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Top-left corner.
    pub fn start(&self) -> &SingleCellReference {
        &self.start
    }

    /// Bottom-right corner.
    pub fn end(&self) -> &SingleCellReference {
        &self.end
    }

    fn contains_cell(&self, cell: &SingleCellReference) -> bool {
        cell.column_index >= self.start.column_index
            && cell.column_index <= self.end.column_index
            && cell.row_index >= self.start.row_index
            && cell.row_index <= self.end.row_index
    }

    /// Returns true if `other` lies entirely within this range.
    ///
    /// Both corners bound the check: a cell above or left of the range
    /// start is not contained.
    pub fn contains_or_subsumes(&self, other: &CellReference) -> bool {
        match other {
            CellReference::Single(cell) => self.contains_cell(cell),
            CellReference::Range(range) => {
                self.contains_cell(&range.start) && self.contains_cell(&range.end)
            }
        }
    }

    /// Grow or shrink the range from its ending corner.
    ///
    /// The end never crosses the starting corner; the result collapses to a
    /// single-cell reference when the corners meet.
    pub fn resize(&self, rows: i64, cols: i64) -> CellReference {
        let end_row = (i64::from(self.end.row_index) + rows)
            .clamp(i64::from(self.start.row_index), i64::from(MAX_ROWS))
            as u32;
        let end_col = (i64::from(self.end.column_index) + cols)
            .clamp(i64::from(self.start.column_index), i64::from(MAX_COLUMNS))
            as u32;
        if end_row == self.start.row_index && end_col == self.start.column_index {
            return CellReference::Single(self.start.clone());
        }
        CellReference::Range(Self::from_corners(
            self.start.clone(),
            SingleCellReference::from_parts(end_col, end_row),
        ))
    }

    /// Translate both corners by the same delta.
    ///
    /// The delta is clamped so the starting corner never crosses row/column
    /// 1 and the ending corner never exceeds the sheet capacity.
    pub fn translate(&self, rows: i64, cols: i64) -> CellReference {
        let row_delta = rows.clamp(
            1 - i64::from(self.start.row_index),
            i64::from(MAX_ROWS) - i64::from(self.end.row_index),
        );
        let col_delta = cols.clamp(
            1 - i64::from(self.start.column_index),
            i64::from(MAX_COLUMNS) - i64::from(self.end.column_index),
        );
        let start = SingleCellReference::from_parts(
            (i64::from(self.start.column_index) + col_delta) as u32,
            (i64::from(self.start.row_index) + row_delta) as u32,
        );
        let end = SingleCellReference::from_parts(
            (i64::from(self.end.column_index) + col_delta) as u32,
            (i64::from(self.end.row_index) + row_delta) as u32,
        );
        CellReference::Range(Self::from_corners(start, end))
    }
}

impl fmt::Display for RangeCellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl TryFrom<String> for RangeCellReference {
    type Error = RefParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RangeCellReference> for String {
    fn from(r: RangeCellReference) -> Self {
        r.value
    }
}

/// A validated cell reference: either a single cell or a range.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CellReference {
    Single(SingleCellReference),
    Range(RangeCellReference),
}

impl CellReference {
    /// Parse either reference form, dispatching on the matched pattern.
    pub fn parse(s: &str) -> Result<Self, RefParseError> {
        if s.is_empty() {
            return Err(RefParseError::Empty);
        }
        if is_single_cell_reference(s) {
            Ok(Self::Single(SingleCellReference::parse(s)?))
        } else if is_range_cell_reference(s) {
            Ok(Self::Range(RangeCellReference::parse(s)?))
        } else {
            Err(RefParseError::Malformed(s.to_string()))
        }
    }

    /// The normalized reference text.
    pub fn value(&self) -> &str {
        match self {
            Self::Single(cell) => cell.value(),
            Self::Range(range) => range.value(),
        }
    }

    /// Containment check, dispatching to the variant's semantics.
    pub fn contains_or_subsumes(&self, other: &CellReference) -> bool {
        match self {
            Self::Single(cell) => cell.contains_or_subsumes(other),
            Self::Range(range) => range.contains_or_subsumes(other),
        }
    }

    /// The single-cell variant, if this is one.
    pub fn as_single(&self) -> Option<&SingleCellReference> {
        match self {
            Self::Single(cell) => Some(cell),
            Self::Range(_) => None,
        }
    }

    /// The range variant, if this is one.
    pub fn as_range(&self) -> Option<&RangeCellReference> {
        match self {
            Self::Single(_) => None,
            Self::Range(range) => Some(range),
        }
    }
}

impl fmt::Display for CellReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for CellReference {
    type Err = RefParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CellReference {
    type Error = RefParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CellReference> for String {
    fn from(r: CellReference) -> Self {
        match r {
            CellReference::Single(cell) => cell.value,
            CellReference::Range(range) => range.value,
        }
    }
}
