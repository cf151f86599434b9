//! Coordinate resolution and value formatting.
//!
//! Row resolution goes through a normalized-name index built once per run
//! instead of repeated linear scans over the snapshot.

use std::collections::HashMap;

use super::snapshot::{HEADER_ROW_OFFSET, SheetSnapshot};

/// Convert a 0-based column index to spreadsheet letter notation.
///
/// Bijective base-26: 0 -> "A", 25 -> "Z", 26 -> "AA", 701 -> "ZZ",
/// 702 -> "AAA". Each step takes `n % 26` as a letter and continues with
/// `n / 26 - 1` until it goes negative.
pub fn column_letter(index: usize) -> String {
    let mut n = index as i64;
    let mut letters = String::new();
    while n >= 0 {
        letters.insert(0, (b'A' + (n % 26) as u8) as char);
        n = n / 26 - 1;
    }
    letters
}

/// Index from trimmed line-item name to its 1-based sheet row.
///
/// Duplicate names are a configuration problem on the sheet: the first
/// occurrence wins and a warning is logged once per duplicate name.
#[derive(Debug)]
pub struct RowLookup {
    index: HashMap<String, u32>,
}

impl RowLookup {
    pub fn build(snapshot: &SheetSnapshot) -> Self {
        let mut index = HashMap::new();
        for (i, row) in snapshot.rows().iter().enumerate() {
            let Some(name) = row.first() else { continue };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if index.contains_key(name) {
                log::warn!("Duplicate row name '{}' in sheet; using the first occurrence.", name);
                continue;
            }
            index.insert(name.to_string(), i as u32 + HEADER_ROW_OFFSET);
        }
        Self { index }
    }

    /// Sheet row for a line-item name, trim-insensitive.
    pub fn find(&self, name: &str) -> Option<u32> {
        self.index.get(name.trim()).copied()
    }
}

/// Format a fractional utilization as a percent string, e.g. 0.873 -> "87.3%".
///
/// Rounds to one decimal place, half away from zero. Computed in integer
/// tenths-of-a-percent so the .x5 boundary behaves exactly.
pub fn format_percent(fraction: f64) -> String {
    let tenths = (fraction * 1000.0).round() as i64;
    format!("{}.{}%", tenths / 10, (tenths % 10).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter_sequence() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(1), "B");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(51), "AZ");
        assert_eq!(column_letter(52), "BA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    fn snapshot() -> SheetSnapshot {
        SheetSnapshot::from_values(vec![
            vec!["".to_string(), "Owner".to_string()],
            vec![" Foo ".to_string(), "X".to_string()],
            vec!["Bar".to_string(), "Y".to_string()],
        ])
    }

    #[test]
    fn test_row_lookup_trims_both_sides() {
        let lookup = RowLookup::build(&snapshot());
        // Sheet cell " Foo " and query "Foo" both normalize to the same key.
        assert_eq!(lookup.find("Foo"), Some(2));
        assert_eq!(lookup.find(" Foo "), Some(2));
        assert_eq!(lookup.find("Bar"), Some(3));
        assert_eq!(lookup.find("Baz"), None);
    }

    #[test]
    fn test_row_lookup_is_idempotent() {
        let snapshot = snapshot();
        let lookup = RowLookup::build(&snapshot);
        let first = lookup.find("Foo");
        assert_eq!(lookup.find("Foo"), first);
        // Rebuilding from the same snapshot gives the same answer.
        assert_eq!(RowLookup::build(&snapshot).find("Foo"), first);
    }

    #[test]
    fn test_row_lookup_duplicate_uses_first() {
        let snapshot = SheetSnapshot::from_values(vec![
            vec!["".to_string()],
            vec!["Foo".to_string()],
            vec!["Foo".to_string()],
        ]);
        let lookup = RowLookup::build(&snapshot);
        assert_eq!(lookup.find("Foo"), Some(2));
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.873), "87.3%");
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(0.9), "90.0%");
        assert_eq!(format_percent(1.0), "100.0%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn test_format_percent_rounds_half_away_from_zero() {
        // 0.0625 is exactly representable; 6.25% sits exactly on the
        // boundary and rounds up to 6.3%.
        assert_eq!(format_percent(0.0625), "6.3%");
        assert_eq!(format_percent(0.1875), "18.8%");
    }
}
