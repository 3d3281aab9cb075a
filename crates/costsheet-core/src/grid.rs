//! The cell-grid seam between the engine and the spreadsheet backend
//!
//! The engine never touches a file format directly: everything it needs from
//! the workbook is expressed by [`SheetGrid`]. [`MemoryGrid`] implements the
//! trait over plain maps for tests and dry runs; `costsheet-xlsx` implements
//! it over real XLSX files.
//!
//! Indexing at this boundary is 1-based for both columns and rows, matching
//! how spreadsheet users (and the backing formats) count.

use std::collections::HashMap;

use crate::addr::{cell_ref, column_letter};
use crate::error::{Error, Result};
use crate::value::CellValue;

/// Repair-highlight colors, one per data-quality rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    /// Red — a numeric column cell that is not a number
    NumericError,
    /// Yellow — a periodicity cell outside the period vocabulary
    PeriodError,
    /// Sepia — a unit cell outside the unit vocabulary
    UnitError,
}

impl Highlight {
    /// ARGB fill color for this highlight
    pub fn argb(&self) -> &'static str {
        match self {
            Highlight::NumericError => "FFFF0000",
            Highlight::PeriodError => "FFFFF200",
            Highlight::UnitError => "FFE3B778",
        }
    }

    /// Map a fill ARGB back to a highlight, if it is one of ours
    pub fn from_argb(argb: &str) -> Option<Self> {
        match argb {
            "FFFF0000" => Some(Highlight::NumericError),
            "FFFFF200" => Some(Highlight::PeriodError),
            "FFE3B778" => Some(Highlight::UnitError),
            _ => None,
        }
    }
}

/// A dropdown list validator bound to one column's data range
#[derive(Debug, Clone, PartialEq)]
pub struct ListValidator {
    /// 1-based column the validator covers
    pub column: u32,
    /// First data row of the covered range
    pub first_row: u32,
    /// Last data row of the covered range
    pub last_row: u32,
    /// Allowed entries, in vocabulary order
    pub entries: Vec<String>,
    /// Title of the input prompt shown on cell selection
    pub prompt_title: String,
    /// Input prompt text
    pub prompt: String,
    /// Title of the error alert shown on invalid entry
    pub error_title: String,
    /// Error alert text
    pub error_message: String,
}

impl ListValidator {
    /// Create a validator over a column range with default messages
    pub fn new(column: u32, first_row: u32, last_row: u32, entries: Vec<String>) -> Self {
        Self {
            column,
            first_row,
            last_row,
            entries,
            prompt_title: String::new(),
            prompt: String::new(),
            error_title: "Invalid Entry".into(),
            error_message: "Given entry is prohibited".into(),
        }
    }

    /// Set the input prompt shown when a covered cell is selected
    pub fn with_prompt(mut self, title: impl Into<String>, message: impl Into<String>) -> Self {
        self.prompt_title = title.into();
        self.prompt = message.into();
        self
    }

    /// The covered range in A1 form, e.g. `"D5:D40"`
    pub fn sqref(&self) -> String {
        format!(
            "{}:{}",
            cell_ref(self.column, self.first_row),
            cell_ref(self.column, self.last_row)
        )
    }

    /// The inline list source formula, e.g. `"\"шт.,м2\""`
    pub fn source_formula(&self) -> String {
        format!("\"{}\"", self.entries.join(","))
    }

    /// Letter form of the covered column
    pub fn column_letter(&self) -> String {
        column_letter(self.column)
    }
}

/// Read/write access to a workbook's cell grids
///
/// Every operation names its sheet by 0-based index; row/column indices are
/// 1-based. Implementations own the workbook for the duration of a run.
pub trait SheetGrid {
    /// Whether the workbook has a sheet at this index
    fn has_sheet(&self, sheet: usize) -> bool;

    /// Read one cell's value
    fn cell_value(&self, sheet: usize, col: u32, row: u32) -> Result<CellValue>;

    /// Write one cell's value
    fn set_cell_value(&mut self, sheet: usize, col: u32, row: u32, value: CellValue) -> Result<()>;

    /// Read one cell's repair highlight, if it carries one
    fn highlight(&self, sheet: usize, col: u32, row: u32) -> Result<Option<Highlight>>;

    /// Apply a repair highlight to one cell
    fn set_highlight(&mut self, sheet: usize, col: u32, row: u32, highlight: Highlight)
        -> Result<()>;

    /// Register a dropdown list validator on a sheet
    fn add_list_validator(&mut self, sheet: usize, validator: ListValidator) -> Result<()>;

    /// Persist the workbook in place
    fn save(&mut self) -> Result<()>;

    /// Read a column slice, rows `first_row..=last_row` inclusive
    ///
    /// Returns an empty vector when `last_row < first_row`.
    fn column_values(
        &self,
        sheet: usize,
        col: u32,
        first_row: u32,
        last_row: u32,
    ) -> Result<Vec<CellValue>> {
        let mut values = Vec::new();
        for row in first_row..=last_row {
            values.push(self.cell_value(sheet, col, row)?);
        }
        Ok(values)
    }
}

/// One sheet of a [`MemoryGrid`]
#[derive(Debug, Default)]
struct MemorySheet {
    cells: HashMap<(u32, u32), CellValue>,
    highlights: HashMap<(u32, u32), Highlight>,
    validators: Vec<ListValidator>,
}

/// In-memory [`SheetGrid`] implementation
///
/// Used by the engine's tests and by callers that want to rehearse a scan
/// without touching a file. Also records how many times [`SheetGrid::save`]
/// was requested.
#[derive(Debug, Default)]
pub struct MemoryGrid {
    sheets: Vec<MemorySheet>,
    saves: u32,
}

impl MemoryGrid {
    /// Create a grid with `count` empty sheets
    pub fn with_sheets(count: usize) -> Self {
        let mut sheets = Vec::new();
        sheets.resize_with(count, MemorySheet::default);
        Self { sheets, saves: 0 }
    }

    /// Set a cell value while building a fixture
    pub fn set_cell(&mut self, sheet: usize, col: u32, row: u32, value: CellValue) {
        if let Some(s) = self.sheets.get_mut(sheet) {
            s.cells.insert((col, row), value);
        }
    }

    /// Read a cell value, `Empty` when unset or the sheet is absent
    pub fn cell(&self, sheet: usize, col: u32, row: u32) -> CellValue {
        self.sheets
            .get(sheet)
            .and_then(|s| s.cells.get(&(col, row)))
            .cloned()
            .unwrap_or(CellValue::Empty)
    }

    /// Read a cell highlight directly
    pub fn cell_highlight(&self, sheet: usize, col: u32, row: u32) -> Option<Highlight> {
        self.sheets
            .get(sheet)
            .and_then(|s| s.highlights.get(&(col, row)))
            .copied()
    }

    /// Validators registered on a sheet
    pub fn validators(&self, sheet: usize) -> &[ListValidator] {
        self.sheets
            .get(sheet)
            .map(|s| s.validators.as_slice())
            .unwrap_or(&[])
    }

    /// How many times the grid was asked to persist
    pub fn save_count(&self) -> u32 {
        self.saves
    }

    fn sheet(&self, sheet: usize) -> Result<&MemorySheet> {
        self.sheets.get(sheet).ok_or(Error::SheetNotFound(sheet))
    }

    fn sheet_mut(&mut self, sheet: usize) -> Result<&mut MemorySheet> {
        self.sheets
            .get_mut(sheet)
            .ok_or(Error::SheetNotFound(sheet))
    }
}

impl SheetGrid for MemoryGrid {
    fn has_sheet(&self, sheet: usize) -> bool {
        sheet < self.sheets.len()
    }

    fn cell_value(&self, sheet: usize, col: u32, row: u32) -> Result<CellValue> {
        Ok(self
            .sheet(sheet)?
            .cells
            .get(&(col, row))
            .cloned()
            .unwrap_or(CellValue::Empty))
    }

    fn set_cell_value(&mut self, sheet: usize, col: u32, row: u32, value: CellValue) -> Result<()> {
        self.sheet_mut(sheet)?.cells.insert((col, row), value);
        Ok(())
    }

    fn highlight(&self, sheet: usize, col: u32, row: u32) -> Result<Option<Highlight>> {
        Ok(self.sheet(sheet)?.highlights.get(&(col, row)).copied())
    }

    fn set_highlight(
        &mut self,
        sheet: usize,
        col: u32,
        row: u32,
        highlight: Highlight,
    ) -> Result<()> {
        self.sheet_mut(sheet)?.highlights.insert((col, row), highlight);
        Ok(())
    }

    fn add_list_validator(&mut self, sheet: usize, validator: ListValidator) -> Result<()> {
        self.sheet_mut(sheet)?.validators.push(validator);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }
}
