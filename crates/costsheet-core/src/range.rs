//! Populated-row range location

use crate::value::CellValue;

/// Find the last contiguous populated row of a column
///
/// `values` holds the column's cells starting at `start_row`; the scan stops
/// at the first empty/blank cell or at the end of the slice (the caller caps
/// the slice at its scan bound). Returns `start_row - 1` when the very first
/// cell is already empty.
pub fn last_populated_row(values: &[CellValue], start_row: u32) -> u32 {
    let populated = values.iter().take_while(|v| !v.is_empty()).count() as u32;
    if populated == 0 {
        start_row.saturating_sub(1)
    } else {
        start_row + populated - 1
    }
}
