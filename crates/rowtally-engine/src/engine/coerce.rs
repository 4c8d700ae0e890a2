//! Numeric coercion of cell values.
//!
//! Every cell read for a total goes through [`to_number`], which never fails:
//! anything that is not a number reads as `0.0`.

use regex::Regex;
use std::sync::LazyLock;

use super::cell::CellValue;

static DECIMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("decimal pattern is valid")
});

/// Coerce a cell value to a number, falling back to `0.0`.
///
/// Blank cells, text that is not a numeric literal, and NaN all read as zero.
/// Booleans read as 1 and 0.
pub fn to_number(value: &CellValue) -> f64 {
    let n = match value {
        CellValue::Empty => 0.0,
        CellValue::Number(n) => *n,
        CellValue::Bool(b) => f64::from(u8::from(*b)),
        CellValue::Text(s) => parse_number(s).unwrap_or(0.0),
    };
    if n.is_nan() { 0.0 } else { n }
}

/// Parse numeric text the way a sheet cell is read as a number.
///
/// Accepts surrounding whitespace, decimal literals with an optional sign and
/// exponent, `0x`/`0o`/`0b` unsigned integer literals and `Infinity`.
/// Blank text parses as `0`. Returns `None` for anything else.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    if let Some(n) = parse_radix_literal(trimmed) {
        return Some(n);
    }

    if DECIMAL_PATTERN.is_match(trimmed) {
        return trimmed.parse::<f64>().ok();
    }

    None
}

fn parse_radix_literal(text: &str) -> Option<f64> {
    let (radix, digits) = match text.get(..2)? {
        "0x" | "0X" => (16, &text[2..]),
        "0o" | "0O" => (8, &text[2..]),
        "0b" | "0B" => (2, &text[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }
    let mut acc = 0f64;
    for c in digits.chars() {
        acc = acc * f64::from(radix) + f64::from(c.to_digit(radix)?);
    }
    Some(acc)
}
