use thiserror::Error;

/// Maximum rows per sheet (1,048,576), matching common spreadsheet limits.
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum columns per row (16,384).
pub const MAX_COLUMNS: u32 = 16_384;

/// Errors raised when parsing cell-reference text or converting columns.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RefParseError {
    #[error("empty cell reference")]
    Empty,
    #[error("malformed cell reference: {0:?}")]
    Malformed(String),
    #[error("invalid column in cell reference")]
    InvalidColumn,
    #[error("invalid row in cell reference")]
    InvalidRow,
}

/// Convert a 1-based column index to its letter name (`1` → `A`, `27` → `AA`).
///
/// Column indices are 1-based; `0` is an error.
pub fn column_name(index: u32) -> Result<String, RefParseError> {
    if index == 0 {
        return Err(RefParseError::InvalidColumn);
    }
    let mut n = index;
    let mut out = Vec::<u8>::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        out.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    out.reverse();
    Ok(String::from_utf8(out).expect("column letters are always valid UTF-8"))
}

/// Convert a column letter name to its 1-based index (`A` → `1`, `Z` → `26`).
///
/// Case-insensitive; errors on empty input or non-letter characters.
pub fn column_index(name: &str) -> Result<u32, RefParseError> {
    if name.is_empty() {
        return Err(RefParseError::InvalidColumn);
    }
    let mut col: u32 = 0;
    for b in name.bytes() {
        if !b.is_ascii_alphabetic() {
            return Err(RefParseError::InvalidColumn);
        }
        let v = (b.to_ascii_uppercase() - b'A') as u32 + 1;
        col = col
            .checked_mul(26)
            .and_then(|c| c.checked_add(v))
            .ok_or(RefParseError::InvalidColumn)?;
    }
    Ok(col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_name_basics() {
        assert_eq!(column_name(1).unwrap(), "A");
        assert_eq!(column_name(26).unwrap(), "Z");
        assert_eq!(column_name(27).unwrap(), "AA");
        assert_eq!(column_name(702).unwrap(), "ZZ");
        assert_eq!(column_name(703).unwrap(), "AAA");
        assert_eq!(column_name(MAX_COLUMNS).unwrap(), "XFD");
    }

    #[test]
    fn column_index_basics() {
        assert_eq!(column_index("A").unwrap(), 1);
        assert_eq!(column_index("z").unwrap(), 26);
        assert_eq!(column_index("aa").unwrap(), 27);
        assert_eq!(column_index("XFD").unwrap(), MAX_COLUMNS);
    }

    #[test]
    fn zero_column_index_is_an_error() {
        assert_eq!(column_name(0), Err(RefParseError::InvalidColumn));
    }

    #[test]
    fn column_index_rejects_non_letters() {
        assert_eq!(column_index(""), Err(RefParseError::InvalidColumn));
        assert_eq!(column_index("A1"), Err(RefParseError::InvalidColumn));
        assert_eq!(column_index("£"), Err(RefParseError::InvalidColumn));
    }

    #[test]
    fn name_index_roundtrip() {
        for i in [1u32, 2, 25, 26, 27, 51, 52, 53, 701, 702, 703, 16_384, 18_278] {
            let name = column_name(i).unwrap();
            assert_eq!(column_index(&name).unwrap(), i, "roundtrip for {i} ({name})");
        }
    }
}
