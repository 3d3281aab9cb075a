//! # costsheet-core
//!
//! Column classification and repair engine for maintenance/cost schedule
//! workbooks.
//!
//! The engine walks the data columns of a schedule sheet, classifies each
//! column by its header text ([`ColumnRole`]), applies a role-specific repair
//! rule (numeric coercion, enumerated-membership checking), synthesizes the
//! derived annual-cost formula, and reports whether anything changed so the
//! caller can decide whether to persist.
//!
//! The spreadsheet file format is an external collaborator: all cell access
//! goes through the [`SheetGrid`] trait. [`MemoryGrid`] is the in-memory
//! implementation used by tests and dry runs; the `costsheet-xlsx` crate
//! binds the trait to real XLSX files.
//!
//! ## Example
//!
//! ```rust
//! use costsheet_core::{CellValue, MemoryGrid, SheetScanner, SCHEDULE_SHEET};
//!
//! let mut grid = MemoryGrid::with_sheets(3);
//! grid.set_cell(SCHEDULE_SHEET, 3, 5, CellValue::text("work item"));
//! grid.set_cell(SCHEDULE_SHEET, 4, 4, CellValue::text("Раз"));
//! grid.set_cell(SCHEDULE_SHEET, 4, 5, CellValue::text("1,5"));
//!
//! let scanner = SheetScanner::open(grid, false).unwrap();
//! let (outcome, grid) = scanner.scan().unwrap();
//! assert!(outcome.numeric_modified);
//! assert_eq!(grid.cell(SCHEDULE_SHEET, 4, 5), CellValue::Number(1.5));
//! ```

pub mod addr;
pub mod classify;
pub mod error;
pub mod formula;
pub mod grid;
pub mod number;
pub mod period;
pub mod range;
pub mod reference;
pub mod repair;
pub mod scanner;
pub mod value;

// Re-exports for convenience
pub use classify::{classify_header, ColumnRole, NumericKind};
pub use error::{Error, Result};
pub use formula::{PriceFormulaBuilder, UNASSIGNABLE};
pub use grid::{Highlight, ListValidator, MemoryGrid, SheetGrid};
pub use range::last_populated_row;
pub use reference::ReferenceValueSet;
pub use repair::ColumnRepairer;
pub use scanner::{ScanOutcome, SheetScanner};
pub use value::CellValue;

/// Sheet index of the schedule itself (the sheet being repaired)
pub const SCHEDULE_SHEET: usize = 0;

/// Sheet index holding the canonical periodicity vocabulary
pub const PERIOD_SHEET: usize = 1;

/// Sheet index holding the canonical unit-of-measure vocabulary
pub const UNIT_SHEET: usize = 2;

/// First row of schedule data (the row right below the header row)
pub const FIRST_DATA_ROW: u32 = 5;

/// First column of the repairable data block
pub const FIRST_DATA_COLUMN: u32 = 4;

/// Column probed to find the last populated schedule row
pub const END_ROW_PROBE_COLUMN: u32 = 3;

/// Number of columns a single scan will visit at most
pub const MAX_SCAN_COLUMNS: u32 = 961;

/// Hard cap on the end-row probe
pub const ROW_SCAN_CAP: u32 = 600;

/// Hard cap when scanning an auxiliary sheet for reference values
pub const REFERENCE_ROW_CAP: u32 = 1000;

/// Fractional values keep at most this many decimal digits
pub const MAX_DECIMAL_DIGITS: u32 = 5;
