//! Reference value sets for the enumerated columns
//!
//! The canonical vocabularies (valid periodicity phrases, valid units of
//! measure) live in auxiliary sheets of the same workbook, one value per row
//! in the first column. They are loaded once per run.

use crate::error::Result;
use crate::grid::SheetGrid;
use crate::value::CellValue;
use crate::REFERENCE_ROW_CAP;

/// An ordered, deduplicated set of canonical values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceValueSet {
    values: Vec<String>,
}

impl ReferenceValueSet {
    /// Build a set from raw values, keeping the first occurrence of each
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for value in values {
            let value = value.into();
            if !set.values.contains(&value) {
                set.values.push(value);
            }
        }
        set
    }

    /// Load the set from an auxiliary sheet's first column
    ///
    /// Scans rows 1 up to the reference cap, stopping at the first empty
    /// cell. A missing sheet is logged and yields an empty set; data simply
    /// won't validate against it, which the repairers surface per cell.
    pub fn load<G: SheetGrid>(grid: &G, sheet: usize) -> Result<Self> {
        if !grid.has_sheet(sheet) {
            log::warn!("reference sheet {} is not defined; using an empty set", sheet);
            return Ok(Self::default());
        }

        let mut set = Self::default();
        for row in 1..=REFERENCE_ROW_CAP {
            let value = grid.cell_value(sheet, 1, row)?;
            if value.is_empty() {
                break;
            }
            let text = match value {
                CellValue::Text(s) => s,
                other => other.to_string(),
            };
            if !set.values.contains(&text) {
                set.values.push(text);
            }
        }
        log::debug!("reference sheet {}: {} values", sheet, set.values.len());
        Ok(set)
    }

    /// Membership test
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }

    /// The values in first-seen order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set holds no values
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
