//! Role-specific column repair rules
//!
//! Numeric columns get coercion, precision clamping, and error marking;
//! enumerated columns get membership checking against their reference set.
//! Both rules are idempotent: a second pass over an already-repaired column
//! reports no modification.

use crate::addr::cell_ref;
use crate::classify::ColumnRole;
use crate::error::{Error, Result};
use crate::grid::{Highlight, ListValidator, SheetGrid};
use crate::number;
use crate::reference::ReferenceValueSet;
use crate::value::CellValue;

/// Applies the repair rule for one column at a time
///
/// Borrows the grid mutably for the duration of a column pass; the reference
/// sets and configuration are per-instance state.
pub struct ColumnRepairer<'a, G: SheetGrid> {
    grid: &'a mut G,
    sheet: usize,
    first_row: u32,
    period_set: &'a ReferenceValueSet,
    unit_set: &'a ReferenceValueSet,
    attach_validators: bool,
}

impl<'a, G: SheetGrid> ColumnRepairer<'a, G> {
    /// Create a repairer over one sheet
    pub fn new(
        grid: &'a mut G,
        sheet: usize,
        first_row: u32,
        period_set: &'a ReferenceValueSet,
        unit_set: &'a ReferenceValueSet,
        attach_validators: bool,
    ) -> Self {
        Self {
            grid,
            sheet,
            first_row,
            period_set,
            unit_set,
            attach_validators,
        }
    }

    /// Repair a numeric column
    ///
    /// Comma-decimal text is rewritten to a number; fractional values are
    /// clamped to the decimal-digit cap; non-numeric, non-formula cells are
    /// marked with the red highlight. Returns whether anything changed:
    /// a rewrite, a truncation, or a newly applied highlight. Writing back
    /// a value that already parsed cleanly does not count.
    pub fn repair_numeric(&mut self, col: u32, values: &[CellValue]) -> Result<bool> {
        let mut modified = false;
        for (offset, value) in values.iter().enumerate() {
            let row = self.first_row + offset as u32;
            match value {
                v if v.is_empty() => {}
                CellValue::Formula(_) => {}
                CellValue::Number(n) => {
                    let (fixed, truncated) = number::clamp_precision(*n);
                    if truncated {
                        self.grid
                            .set_cell_value(self.sheet, col, row, CellValue::Number(fixed))?;
                        modified = true;
                    }
                }
                CellValue::Text(s) => {
                    let coercion = number::coerce(s);
                    match coercion.value() {
                        Some(n) => {
                            let (fixed, truncated) = number::clamp_precision(n);
                            self.grid
                                .set_cell_value(self.sheet, col, row, CellValue::Number(fixed))?;
                            if coercion.rewritten() || truncated {
                                log::debug!(
                                    "cell {}: '{}' rewritten to {}",
                                    cell_ref(col, row),
                                    s,
                                    fixed
                                );
                                modified = true;
                            }
                        }
                        None => {
                            if self.mark(col, row, Highlight::NumericError)? {
                                log::warn!(
                                    "cell {} is not a number: '{}'",
                                    cell_ref(col, row),
                                    s
                                );
                                modified = true;
                            }
                        }
                    }
                }
                CellValue::Empty => {}
            }
        }
        Ok(modified)
    }

    /// Repair an enumerated (period or unit) column
    ///
    /// Cells absent from the role's reference set get the role's highlight,
    /// once. When validator attachment was requested, the column's data range
    /// is also registered against a dropdown validator built from the set.
    /// Any role other than period/unit is an error; the orchestrator is
    /// responsible for only dispatching recognized roles here.
    pub fn repair_enumerated(
        &mut self,
        col: u32,
        values: &[CellValue],
        role: ColumnRole,
        header: &str,
    ) -> Result<bool> {
        let (set, highlight, prompt_title, prompt) = match role {
            ColumnRole::Period => (
                self.period_set,
                Highlight::PeriodError,
                "Period list selection",
                "Please select period from list",
            ),
            ColumnRole::Unit => (
                self.unit_set,
                Highlight::UnitError,
                "Unit list selection",
                "Please select unit from list",
            ),
            _ => return Err(Error::UnrecognizedHeader(header.to_string())),
        };

        let mut modified = false;
        for (offset, value) in values.iter().enumerate() {
            let row = self.first_row + offset as u32;
            if value.is_empty() {
                continue;
            }
            let in_set = value.as_text().map(|s| set.contains(s)).unwrap_or(false);
            if !in_set && self.mark(col, row, highlight)? {
                log::warn!(
                    "cell {}: '{}' is not in the {} vocabulary",
                    cell_ref(col, row),
                    value,
                    header
                );
                modified = true;
            }
        }

        if self.attach_validators && !values.is_empty() {
            let last_row = self.first_row + values.len() as u32 - 1;
            let validator = ListValidator::new(col, self.first_row, last_row, set.values().to_vec())
                .with_prompt(prompt_title, prompt);
            self.grid.add_list_validator(self.sheet, validator)?;
        }

        Ok(modified)
    }

    /// Apply a highlight unless the cell already carries the same one
    ///
    /// Returns whether the highlight was newly applied.
    fn mark(&mut self, col: u32, row: u32, highlight: Highlight) -> Result<bool> {
        if self.grid.highlight(self.sheet, col, row)? == Some(highlight) {
            return Ok(false);
        }
        self.grid.set_highlight(self.sheet, col, row, highlight)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MemoryGrid;
    use pretty_assertions::assert_eq;

    const SHEET: usize = 0;
    const FIRST_ROW: u32 = 5;

    fn sets() -> (ReferenceValueSet, ReferenceValueSet) {
        (
            ReferenceValueSet::from_values(["Ежемесячно", "Ежегодно"]),
            ReferenceValueSet::from_values(["шт.", "м2"]),
        )
    }

    fn column(grid: &MemoryGrid, col: u32, rows: u32) -> Vec<CellValue> {
        (0..rows)
            .map(|i| grid.cell(SHEET, col, FIRST_ROW + i))
            .collect()
    }

    #[test]
    fn test_numeric_comma_rewrite() {
        let mut grid = MemoryGrid::with_sheets(1);
        grid.set_cell(SHEET, 4, 5, CellValue::text("1,5"));
        let (periods, units) = sets();

        let mut repairer =
            ColumnRepairer::new(&mut grid, SHEET, FIRST_ROW, &periods, &units, false);
        let values = vec![CellValue::text("1,5")];
        assert!(repairer.repair_numeric(4, &values).unwrap());
        assert_eq!(grid.cell(SHEET, 4, 5), CellValue::Number(1.5));
    }

    #[test]
    fn test_numeric_truncates_long_fractions() {
        let mut grid = MemoryGrid::with_sheets(1);
        grid.set_cell(SHEET, 4, 5, CellValue::Number(1.2345678));
        let (periods, units) = sets();

        let mut repairer =
            ColumnRepairer::new(&mut grid, SHEET, FIRST_ROW, &periods, &units, false);
        let values = vec![CellValue::Number(1.2345678)];
        assert!(repairer.repair_numeric(4, &values).unwrap());
        assert_eq!(grid.cell(SHEET, 4, 5), CellValue::Number(1.23457));
    }

    #[test]
    fn test_numeric_marks_junk_and_spares_formulas() {
        let mut grid = MemoryGrid::with_sheets(1);
        grid.set_cell(SHEET, 4, 5, CellValue::text("дважды"));
        grid.set_cell(SHEET, 4, 6, CellValue::formula("=B6*2"));
        let (periods, units) = sets();

        let values = column(&grid, 4, 2);
        let mut repairer =
            ColumnRepairer::new(&mut grid, SHEET, FIRST_ROW, &periods, &units, false);
        assert!(repairer.repair_numeric(4, &values).unwrap());

        assert_eq!(
            grid.cell_highlight(SHEET, 4, 5),
            Some(Highlight::NumericError)
        );
        assert_eq!(grid.cell_highlight(SHEET, 4, 6), None);
        assert_eq!(grid.cell(SHEET, 4, 6), CellValue::formula("=B6*2"));
    }

    #[test]
    fn test_numeric_repair_is_idempotent() {
        let mut grid = MemoryGrid::with_sheets(1);
        grid.set_cell(SHEET, 4, 5, CellValue::text("1,5"));
        grid.set_cell(SHEET, 4, 6, CellValue::text("не число"));
        let (periods, units) = sets();

        let values = column(&grid, 4, 2);
        let mut repairer =
            ColumnRepairer::new(&mut grid, SHEET, FIRST_ROW, &periods, &units, false);
        assert!(repairer.repair_numeric(4, &values).unwrap());

        // second pass over the corrected column reports no modification
        let values = column(&grid, 4, 2);
        let mut repairer =
            ColumnRepairer::new(&mut grid, SHEET, FIRST_ROW, &periods, &units, false);
        assert!(!repairer.repair_numeric(4, &values).unwrap());
    }

    #[test]
    fn test_enumerated_marks_out_of_set_once() {
        let mut grid = MemoryGrid::with_sheets(1);
        grid.set_cell(SHEET, 5, 5, CellValue::text("шт."));
        grid.set_cell(SHEET, 5, 6, CellValue::text("бочка"));
        let (periods, units) = sets();

        let values = column(&grid, 5, 2);
        let mut repairer =
            ColumnRepairer::new(&mut grid, SHEET, FIRST_ROW, &periods, &units, false);
        assert!(repairer
            .repair_enumerated(5, &values, ColumnRole::Unit, "Ед.изм.")
            .unwrap());
        assert_eq!(grid.cell_highlight(SHEET, 5, 5), None);
        assert_eq!(grid.cell_highlight(SHEET, 5, 6), Some(Highlight::UnitError));

        // the same highlight is never re-applied
        let values = column(&grid, 5, 2);
        let mut repairer =
            ColumnRepairer::new(&mut grid, SHEET, FIRST_ROW, &periods, &units, false);
        assert!(!repairer
            .repair_enumerated(5, &values, ColumnRole::Unit, "Ед.изм.")
            .unwrap());
    }

    #[test]
    fn test_enumerated_attaches_validator_on_request() {
        let mut grid = MemoryGrid::with_sheets(1);
        grid.set_cell(SHEET, 5, 5, CellValue::text("Ежемесячно"));
        let (periods, units) = sets();

        let values = column(&grid, 5, 1);
        let mut repairer = ColumnRepairer::new(&mut grid, SHEET, FIRST_ROW, &periods, &units, true);
        repairer
            .repair_enumerated(5, &values, ColumnRole::Period, "Периодичность")
            .unwrap();

        let validators = grid.validators(SHEET);
        assert_eq!(validators.len(), 1);
        assert_eq!(validators[0].sqref(), "E5:E5");
        assert_eq!(validators[0].entries, ["Ежемесячно", "Ежегодно"]);
        assert_eq!(validators[0].prompt_title, "Period list selection");
    }

    #[test]
    fn test_enumerated_rejects_other_roles() {
        let mut grid = MemoryGrid::with_sheets(1);
        let (periods, units) = sets();
        let mut repairer =
            ColumnRepairer::new(&mut grid, SHEET, FIRST_ROW, &periods, &units, false);
        let err = repairer
            .repair_enumerated(5, &[], ColumnRole::Derived, "Годовая стоимость")
            .unwrap_err();
        assert!(matches!(err, Error::UnrecognizedHeader(_)));
    }
}
