//! Header-driven column classification
//!
//! The schedule's data columns are recognized purely by their header text.
//! Headers outside the known vocabulary classify as [`ColumnRole::None`] and
//! pass through the scan untouched.

/// Which numeric column a header names
///
/// The scanner needs to tell the three plain numeric columns apart because
/// they are the operands of the derived annual-cost formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// "Раз" — how many times the work is done per occurrence
    Count,
    /// "Объем" — quantity of work per occurrence
    Quantity,
    /// "Расценка" — unit rate
    Rate,
}

/// Semantic role of a schedule column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    /// Free numeric column, repaired by coercion/truncation
    Numeric(NumericKind),
    /// Periodicity column, checked against the period vocabulary
    Period,
    /// Unit-of-measure column, checked against the unit vocabulary
    Unit,
    /// Annual-cost column, recomputed from the other columns
    Derived,
    /// Unknown header; the column is skipped
    None,
}

/// Map a column header to its semantic role
///
/// Pure lookup over the closed header vocabulary of the schedule form.
pub fn classify_header(header: &str) -> ColumnRole {
    match header.trim() {
        "Раз" => ColumnRole::Numeric(NumericKind::Count),
        "Объем" => ColumnRole::Numeric(NumericKind::Quantity),
        "Расценка" => ColumnRole::Numeric(NumericKind::Rate),
        "Периодичность" => ColumnRole::Period,
        "Ед.изм." => ColumnRole::Unit,
        "Годовая стоимость" => ColumnRole::Derived,
        _ => ColumnRole::None,
    }
}
