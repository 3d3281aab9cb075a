//! The sheet scanner — orchestrates one full repair run
//!
//! Walks the data columns in order, classifies each by its header, dispatches
//! to the role's repairer, tracks the operand columns of the annual-cost
//! formula, and persists the workbook only when something actually changed
//! (or validators were requested, since attaching them mutates the file).

use crate::classify::{classify_header, ColumnRole, NumericKind};
use crate::error::{Error, Result};
use crate::formula::{PriceFormulaBuilder, UNASSIGNABLE};
use crate::grid::SheetGrid;
use crate::period::translate_column;
use crate::range::last_populated_row;
use crate::reference::ReferenceValueSet;
use crate::repair::ColumnRepairer;
use crate::value::CellValue;
use crate::{
    END_ROW_PROBE_COLUMN, FIRST_DATA_COLUMN, FIRST_DATA_ROW, MAX_SCAN_COLUMNS, PERIOD_SHEET,
    ROW_SCAN_CAP, SCHEDULE_SHEET, UNIT_SHEET,
};

/// What a completed scan did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// A numeric column cell was rewritten, truncated, or error-marked
    pub numeric_modified: bool,
    /// An enumerated column cell was error-marked
    pub other_modified: bool,
    /// The workbook was persisted
    pub saved: bool,
    /// Last populated schedule row
    pub end_row: u32,
}

/// Scans and repairs one schedule workbook
///
/// Owns the grid for the duration of the run; [`SheetScanner::scan`] gives it
/// back together with the outcome so callers can inspect the result.
pub struct SheetScanner<G: SheetGrid> {
    grid: G,
    end_row: u32,
    period_set: ReferenceValueSet,
    unit_set: ReferenceValueSet,
    attach_validators: bool,
}

impl<G: SheetGrid> SheetScanner<G> {
    /// Open a scanner over a loaded workbook grid
    ///
    /// Probes the last populated schedule row and loads both reference
    /// vocabularies up front.
    pub fn open(grid: G, attach_validators: bool) -> Result<Self> {
        if !grid.has_sheet(SCHEDULE_SHEET) {
            return Err(Error::SheetNotFound(SCHEDULE_SHEET));
        }

        let probe =
            grid.column_values(SCHEDULE_SHEET, END_ROW_PROBE_COLUMN, FIRST_DATA_ROW, ROW_SCAN_CAP)?;
        let end_row = last_populated_row(&probe, FIRST_DATA_ROW);
        log::debug!("schedule data ends at row {}", end_row);

        let period_set = ReferenceValueSet::load(&grid, PERIOD_SHEET)?;
        let unit_set = ReferenceValueSet::load(&grid, UNIT_SHEET)?;

        Ok(Self {
            grid,
            end_row,
            period_set,
            unit_set,
            attach_validators,
        })
    }

    /// Last populated schedule row, as located at open time
    pub fn end_row(&self) -> u32 {
        self.end_row
    }

    /// Periodicity vocabulary loaded from the auxiliary sheet
    pub fn period_set(&self) -> &ReferenceValueSet {
        &self.period_set
    }

    /// Unit-of-measure vocabulary loaded from the auxiliary sheet
    pub fn unit_set(&self) -> &ReferenceValueSet {
        &self.unit_set
    }

    /// Run the full column scan and persist if anything changed
    pub fn scan(mut self) -> Result<(ScanOutcome, G)> {
        let mut numeric_modified = false;
        let mut other_modified = false;

        let mut count_col: Option<u32> = None;
        let mut quantity_col: Option<u32> = None;
        let mut rate_col: Option<u32> = None;
        let mut periods: Option<Vec<Option<u32>>> = None;

        for col in FIRST_DATA_COLUMN..FIRST_DATA_COLUMN + MAX_SCAN_COLUMNS {
            let header_cell = self.grid.cell_value(SCHEDULE_SHEET, col, FIRST_DATA_ROW - 1)?;
            let Some(header) = header_cell.as_text().map(str::to_owned) else {
                continue;
            };
            let role = classify_header(&header);
            if role == ColumnRole::None {
                continue;
            }

            let values =
                self.grid
                    .column_values(SCHEDULE_SHEET, col, FIRST_DATA_ROW, self.end_row)?;
            log::debug!("column {}: header '{}', role {:?}", col, header, role);

            match role {
                ColumnRole::Numeric(kind) => {
                    if self.repairer().repair_numeric(col, &values)? {
                        numeric_modified = true;
                    }
                    match kind {
                        NumericKind::Count => count_col = Some(col),
                        NumericKind::Quantity => quantity_col = Some(col),
                        NumericKind::Rate => rate_col = Some(col),
                    }
                }
                ColumnRole::Period => {
                    if self
                        .repairer()
                        .repair_enumerated(col, &values, role, &header)?
                    {
                        other_modified = true;
                    }
                    periods = Some(translate_column(&values));
                }
                ColumnRole::Unit => {
                    if self
                        .repairer()
                        .repair_enumerated(col, &values, role, &header)?
                    {
                        other_modified = true;
                    }
                }
                ColumnRole::Derived => {
                    // The annual-cost column is itself numeric; repair it
                    // before overwriting rows with synthesized formulas.
                    if self.repairer().repair_numeric(col, &values)? {
                        numeric_modified = true;
                    }
                    match (count_col, quantity_col, rate_col, periods.as_ref()) {
                        (Some(count), Some(quantity), Some(rate), Some(periods)) => {
                            if self.write_formulas(col, count, quantity, rate, periods)? {
                                numeric_modified = true;
                            }
                        }
                        _ => log::warn!(
                            "column {}: annual cost reached before all operand columns; \
                             formula synthesis skipped",
                            col
                        ),
                    }
                }
                ColumnRole::None => {}
            }
        }

        let saved = numeric_modified || other_modified || self.attach_validators;
        if saved {
            self.grid.save()?;
        }
        log::info!(
            "scan finished: numeric_modified={}, other_modified={}, saved={}",
            numeric_modified,
            other_modified,
            saved
        );

        Ok((
            ScanOutcome {
                numeric_modified,
                other_modified,
                saved,
                end_row: self.end_row,
            },
            self.grid,
        ))
    }

    fn repairer(&mut self) -> ColumnRepairer<'_, G> {
        ColumnRepairer::new(
            &mut self.grid,
            SCHEDULE_SHEET,
            FIRST_DATA_ROW,
            &self.period_set,
            &self.unit_set,
            self.attach_validators,
        )
    }

    /// Synthesize the annual-cost formulas and write the assemblable rows
    ///
    /// Rows that produced the sentinel keep their pre-existing value.
    /// Returns whether any cell's content actually changed.
    fn write_formulas(
        &mut self,
        col: u32,
        count_col: u32,
        quantity_col: u32,
        rate_col: u32,
        periods: &[Option<u32>],
    ) -> Result<bool> {
        let count =
            self.grid
                .column_values(SCHEDULE_SHEET, count_col, FIRST_DATA_ROW, self.end_row)?;
        let quantity =
            self.grid
                .column_values(SCHEDULE_SHEET, quantity_col, FIRST_DATA_ROW, self.end_row)?;
        let rate =
            self.grid
                .column_values(SCHEDULE_SHEET, rate_col, FIRST_DATA_ROW, self.end_row)?;

        let builder = PriceFormulaBuilder::new(count_col, quantity_col, rate_col, FIRST_DATA_ROW);
        let formulas = builder.build(periods, &count, &quantity, &rate);

        let mut changed = false;
        for (offset, formula) in formulas.into_iter().enumerate() {
            let row = FIRST_DATA_ROW + offset as u32;
            if formula == UNASSIGNABLE {
                log::debug!("row {}: cost not assignable, cell left untouched", row);
                continue;
            }
            let next = CellValue::Formula(formula);
            if self.grid.cell_value(SCHEDULE_SHEET, col, row)? != next {
                self.grid.set_cell_value(SCHEDULE_SHEET, col, row, next)?;
                changed = true;
            }
        }
        Ok(changed)
    }
}
