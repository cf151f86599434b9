//! One-shot tabular view of the destination worksheet.
//!
//! The snapshot is fetched once per run and consulted read-only for row and
//! column resolution; cell writes afterwards do not reflect back into it.

use std::fmt;

/// Header of the column holding the accountable team for each row.
pub const OWNER_HEADER: &str = "Owner";

/// Data row 0 lives on sheet row 2: rows are 1-based and row 1 is the header.
pub const HEADER_ROW_OFFSET: u32 = 2;

#[derive(Debug, Clone, Default)]
pub struct SheetSnapshot {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SheetSnapshot {
    /// Build from raw sheet values; the first row becomes the header row.
    pub fn from_values(mut values: Vec<Vec<String>>) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        let headers = values.remove(0);
        Self {
            headers,
            rows: values,
        }
    }

    /// Data rows, excluding the header row.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 0-based position of the column whose header exactly equals `header`.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Column letter ("A", "B", ..., "AA") for an exactly matching header.
    pub fn column(&self, header: &str) -> Option<String> {
        self.column_index(header).map(super::resolve::column_letter)
    }
}

/// A single target cell in A1 notation parts: column letters plus the
/// 1-based sheet row (header offset already applied).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAddress {
    pub column: String,
    pub row: u32,
}

impl CellAddress {
    pub fn new(column: impl Into<String>, row: u32) -> Self {
        Self {
            column: column.into(),
            row,
        }
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SheetSnapshot {
        SheetSnapshot::from_values(vec![
            vec!["".to_string(), "Owner".to_string(), "6/4/25".to_string()],
            vec!["A".to_string(), "X".to_string(), "".to_string()],
        ])
    }

    #[test]
    fn test_column_lookup() {
        let snapshot = snapshot();
        assert_eq!(snapshot.column_index("Owner"), Some(1));
        assert_eq!(snapshot.column("Owner"), Some("B".to_string()));
        assert_eq!(snapshot.column("6/4/25"), Some("C".to_string()));
    }

    #[test]
    fn test_missing_header_resolves_to_none() {
        assert_eq!(snapshot().column("6/5/25"), None);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = SheetSnapshot::from_values(vec![]);
        assert!(snapshot.rows().is_empty());
        assert_eq!(snapshot.column("Owner"), None);
    }

    #[test]
    fn test_cell_address_display() {
        assert_eq!(CellAddress::new("C", 2).to_string(), "C2");
        assert_eq!(CellAddress::new("AA", 17).to_string(), "AA17");
    }
}
