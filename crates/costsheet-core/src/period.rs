//! Periodicity translation
//!
//! Maps the canonical periodicity phrases of the schedule form to the number
//! of times the work occurs per year. Unrecognized phrases translate to
//! "no value", which later excludes the row from the annual-cost formula;
//! they are never coerced to zero.

use crate::value::CellValue;

/// Translate one periodicity phrase to its annual occurrence count
pub fn annual_occurrences(phrase: &str) -> Option<u32> {
    match phrase.trim() {
        "Ежедневно" => Some(365),
        "Еженедельно" | "1 раз в неделю" => Some(52),
        "2 раза в месяц" => Some(24),
        "Ежемесячно" | "1 раз в месяц" => Some(12),
        "Ежеквартально" | "1 раз в квартал" => Some(4),
        "2 раза в год" | "1 раз в полугодие" => Some(2),
        "Ежегодно" | "1 раз в год" => Some(1),
        _ => None,
    }
}

/// Translate a periodicity column cell-by-cell
///
/// Text goes through the phrase table. A positive integer cell is taken at
/// face value as the annual count. Everything else is `None`.
pub fn translate_column(values: &[CellValue]) -> Vec<Option<u32>> {
    values
        .iter()
        .map(|value| match value {
            CellValue::Text(s) => annual_occurrences(s),
            CellValue::Number(n) if *n >= 1.0 && n.fract() == 0.0 => Some(*n as u32),
            _ => None,
        })
        .collect()
}
