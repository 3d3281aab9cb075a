//! XLSX-backed implementation of the engine's grid trait

use std::path::{Path, PathBuf};

use costsheet_core::error::Error as CoreError;
use costsheet_core::{CellValue, Highlight, ListValidator, SheetGrid};
use umya_spreadsheet::{
    DataValidation, DataValidationValues, DataValidations, Spreadsheet, Worksheet,
};

use crate::error::{Error, Result};

/// A workbook opened from disk, exposed to the engine as a [`SheetGrid`]
///
/// Owns the workbook for the duration of one run and saves back to the path
/// it was opened from.
#[derive(Debug)]
pub struct XlsxGrid {
    book: Spreadsheet,
    path: PathBuf,
}

impl XlsxGrid {
    /// Open a workbook file
    ///
    /// Distinguishes a missing file from one that exists but cannot be read
    /// as an XLSX workbook.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| Error::InvalidFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        log::debug!("opened workbook {}", path.display());
        Ok(Self {
            book,
            path: path.to_path_buf(),
        })
    }

    /// The path this workbook was opened from (and will be saved to)
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet(&self, sheet: usize) -> costsheet_core::Result<&Worksheet> {
        self.book
            .get_sheet(&sheet)
            .ok_or(CoreError::SheetNotFound(sheet))
    }

    fn sheet_mut(&mut self, sheet: usize) -> costsheet_core::Result<&mut Worksheet> {
        self.book
            .get_sheet_mut(&sheet)
            .ok_or(CoreError::SheetNotFound(sheet))
    }
}

/// Read one cell through the backend
///
/// Numeric detection is by parse: the engine treats "a number stored as
/// text" and a real numeric cell identically, so the distinction is not
/// preserved here.
fn read_cell(sheet: &Worksheet, col: u32, row: u32) -> CellValue {
    let Some(cell) = sheet.get_cell((col, row)) else {
        return CellValue::Empty;
    };
    let formula = cell.get_formula();
    if !formula.is_empty() {
        return CellValue::formula(formula);
    }
    let raw = cell.get_value();
    if raw.is_empty() {
        CellValue::Empty
    } else if let Ok(n) = raw.parse::<f64>() {
        CellValue::Number(n)
    } else {
        CellValue::Text(raw.to_string())
    }
}

fn fill_argb(sheet: &Worksheet, col: u32, row: u32) -> Option<String> {
    let cell = sheet.get_cell((col, row))?;
    let argb = cell
        .get_style()
        .get_fill()?
        .get_pattern_fill()?
        .get_foreground_color()?
        .get_argb()
        .to_string();
    if argb.is_empty() {
        None
    } else {
        Some(argb)
    }
}

impl SheetGrid for XlsxGrid {
    fn has_sheet(&self, sheet: usize) -> bool {
        self.book.get_sheet(&sheet).is_some()
    }

    fn cell_value(&self, sheet: usize, col: u32, row: u32) -> costsheet_core::Result<CellValue> {
        Ok(read_cell(self.sheet(sheet)?, col, row))
    }

    fn set_cell_value(
        &mut self,
        sheet: usize,
        col: u32,
        row: u32,
        value: CellValue,
    ) -> costsheet_core::Result<()> {
        let cell = self.sheet_mut(sheet)?.get_cell_mut((col, row));
        match value {
            CellValue::Empty => {
                cell.set_value_string("");
            }
            CellValue::Text(s) => {
                cell.set_value_string(s);
            }
            CellValue::Number(n) => {
                cell.set_value_number(n);
            }
            CellValue::Formula(f) => {
                // the backend stores formulas without the leading '='
                cell.set_formula(f.trim_start_matches('='));
            }
        }
        Ok(())
    }

    fn highlight(
        &self,
        sheet: usize,
        col: u32,
        row: u32,
    ) -> costsheet_core::Result<Option<Highlight>> {
        let sheet = self.sheet(sheet)?;
        Ok(fill_argb(sheet, col, row).and_then(|argb| Highlight::from_argb(&argb)))
    }

    fn set_highlight(
        &mut self,
        sheet: usize,
        col: u32,
        row: u32,
        highlight: Highlight,
    ) -> costsheet_core::Result<()> {
        self.sheet_mut(sheet)?
            .get_cell_mut((col, row))
            .get_style_mut()
            .set_background_color(highlight.argb());
        Ok(())
    }

    fn add_list_validator(
        &mut self,
        sheet: usize,
        validator: ListValidator,
    ) -> costsheet_core::Result<()> {
        let sheet = self.sheet_mut(sheet)?;

        if sheet.get_data_validations_mut().is_none() {
            sheet.set_data_validations(DataValidations::default());
        }
        let validations = sheet
            .get_data_validations_mut()
            .ok_or_else(|| CoreError::Grid("failed to initialize data validations".into()))?;

        let mut dv = DataValidation::default();
        dv.set_type(DataValidationValues::List);
        dv.get_sequence_of_references_mut()
            .set_sqref(validator.sqref());
        dv.set_formula1(validator.source_formula());
        dv.set_allow_blank(true);
        dv.set_show_input_message(true);
        dv.set_prompt_title(validator.prompt_title.clone());
        dv.set_prompt(validator.prompt.clone());
        dv.set_show_error_message(true);
        dv.set_error_title(validator.error_title.clone());
        dv.set_error_message(validator.error_message.clone());
        validations.add_data_validation_list(dv);

        log::debug!(
            "attached list validator over {} ({} entries)",
            validator.sqref(),
            validator.entries.len()
        );
        Ok(())
    }

    fn save(&mut self) -> costsheet_core::Result<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, &self.path)
            .map_err(CoreError::grid)?;
        log::debug!("saved workbook {}", self.path.display());
        Ok(())
    }
}
