//! Numeric coercion for ambiguous cell text
//!
//! Schedule workbooks arrive with numbers typed three ways: proper numeric
//! cells, decimal-point text ("1.5"), and comma-decimal text ("1,5").
//! [`coerce`] decides which of these a raw text value is and normalizes it.

use crate::MAX_DECIMAL_DIGITS;

/// Outcome of coercing one raw text value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberCoercion {
    /// The text parsed directly as a decimal number
    Parsed(f64),

    /// The text was a comma-decimal form and had to be rewritten
    Rewritten(f64),

    /// The text does not represent a number
    NotNumeric,
}

impl NumberCoercion {
    /// Check whether the value represented a number at all
    pub fn is_number(&self) -> bool {
        !matches!(self, NumberCoercion::NotNumeric)
    }

    /// Check whether normalization changed the textual form
    pub fn rewritten(&self) -> bool {
        matches!(self, NumberCoercion::Rewritten(_))
    }

    /// The normalized numeric value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            NumberCoercion::Parsed(n) | NumberCoercion::Rewritten(n) => Some(*n),
            NumberCoercion::NotNumeric => None,
        }
    }
}

/// Decide whether raw cell text represents a number and normalize it
///
/// Accepts standard decimal forms directly, and `<digits>,<digits>` (with an
/// optional leading `-`) as a comma-decimal form. Any other comma arity or
/// non-digit group is not a number.
pub fn coerce(raw: &str) -> NumberCoercion {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<f64>() {
        return NumberCoercion::Parsed(n);
    }

    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() != 2 {
        return NumberCoercion::NotNumeric;
    }

    let (negative, whole) = match parts[0].strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, parts[0]),
    };
    let frac = parts[1];

    if whole.is_empty() || frac.is_empty() {
        return NumberCoercion::NotNumeric;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return NumberCoercion::NotNumeric;
    }

    match format!("{}.{}", whole, frac).parse::<f64>() {
        Ok(n) => NumberCoercion::Rewritten(if negative { -n } else { n }),
        Err(_) => NumberCoercion::NotNumeric,
    }
}

/// Count the decimal digits of a value's shortest display form
///
/// Returns `None` for integers.
pub fn decimal_digits(n: f64) -> Option<u32> {
    if n.fract() == 0.0 {
        return None;
    }
    let s = format!("{}", n);
    s.find('.').map(|dot| (s.len() - dot - 1) as u32)
}

/// Reduce a value to at most `digits` decimal digits (round-half-up display)
pub fn truncate(n: f64, digits: u32) -> f64 {
    format!("{:.*}", digits as usize, n).parse().unwrap_or(n)
}

/// Normalize a numeric value to the engine's decimal-digit cap
///
/// Returns the value to store and whether truncation changed it.
pub fn clamp_precision(n: f64) -> (f64, bool) {
    match decimal_digits(n) {
        Some(d) if d > MAX_DECIMAL_DIGITS => (truncate(n, MAX_DECIMAL_DIGITS), true),
        _ => (n, false),
    }
}
