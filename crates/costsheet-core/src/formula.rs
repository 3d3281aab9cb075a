//! Annual-cost formula synthesis
//!
//! The derived column is not evaluated here; the engine only writes formula
//! text back into the sheet and lets the spreadsheet application compute it.

use crate::addr::column_letter;
use crate::value::CellValue;

/// Sentinel produced for rows whose cost cannot be assembled
///
/// The orchestrator never writes the sentinel into the sheet; the row's
/// pre-existing value is left untouched instead.
pub const UNASSIGNABLE: &str = "#ERR";

/// Builds per-row annual-cost formulas from the operand columns
///
/// One row's cost is `count * periodicity * quantity * rate / 1000`, where
/// count/quantity/rate stay cell references and the periodicity multiplier
/// is inlined as a literal.
#[derive(Debug, Clone)]
pub struct PriceFormulaBuilder {
    count: String,
    quantity: String,
    rate: String,
    first_row: u32,
}

impl PriceFormulaBuilder {
    /// Create a builder from the three operand column indices (1-based)
    pub fn new(count_col: u32, quantity_col: u32, rate_col: u32, first_row: u32) -> Self {
        Self {
            count: column_letter(count_col),
            quantity: column_letter(quantity_col),
            rate: column_letter(rate_col),
            first_row,
        }
    }

    /// Synthesize one output per row
    ///
    /// `periods` and the three operand slices are aligned, starting at the
    /// builder's first data row. A row yields a formula only when its
    /// periodicity translated to a value and all three operand cells are
    /// populated; otherwise it yields [`UNASSIGNABLE`].
    pub fn build(
        &self,
        periods: &[Option<u32>],
        count: &[CellValue],
        quantity: &[CellValue],
        rate: &[CellValue],
    ) -> Vec<String> {
        periods
            .iter()
            .enumerate()
            .map(|(offset, period)| {
                let present = |col: &[CellValue]| col.get(offset).is_some_and(|v| !v.is_empty());
                match period {
                    Some(p) if present(count) && present(quantity) && present(rate) => {
                        let row = self.first_row + offset as u32;
                        format!(
                            "={count}{row}*{p}*{quantity}{row}*{rate}{row}/1000",
                            count = self.count,
                            quantity = self.quantity,
                            rate = self.rate,
                        )
                    }
                    _ => UNASSIGNABLE.to_string(),
                }
            })
            .collect()
    }
}
