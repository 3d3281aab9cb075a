//! Column-letter and A1-style reference helpers
//!
//! The grid boundary is 1-based: column 1 is "A", row 1 is the first row.

/// Convert a 1-based column index to its letter form ("A", "B", ..., "AA")
pub fn column_letter(col: u32) -> String {
    debug_assert!(col >= 1, "column indices are 1-based");
    let mut col = col;
    let mut letters = Vec::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        letters.push(b'A' + rem);
        col = (col - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Format an A1-style cell reference from 1-based column and row indices
pub fn cell_ref(col: u32, row: u32) -> String {
    format!("{}{}", column_letter(col), row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(1), "A");
        assert_eq!(column_letter(4), "D");
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn test_cell_ref() {
        assert_eq!(cell_ref(4, 5), "D5");
        assert_eq!(cell_ref(28, 12), "AB12");
    }
}
