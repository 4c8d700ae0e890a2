//! Number display formats.

use super::error::{EngineError, Result};

/// A parsed numeric display format made of `#`, `0`, `,` and `.`.
///
/// `0` forces a digit, `#` shows one only when significant, and a `,` in the
/// integer part turns on thousands grouping. `#,###` therefore renders
/// `1234567` as `1,234,567` and `0` as an empty string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    grouping: bool,
    min_int_digits: usize,
    min_frac_digits: usize,
    max_frac_digits: usize,
}

impl NumberFormat {
    pub fn parse(pattern: &str) -> Result<NumberFormat> {
        let invalid = |message: &str| EngineError::InvalidNumberFormat {
            pattern: pattern.to_string(),
            message: message.to_string(),
        };

        if pattern.is_empty() {
            return Err(invalid("empty pattern"));
        }
        if let Some(c) = pattern.chars().find(|&c| !matches!(c, '#' | '0' | ',' | '.')) {
            return Err(invalid(&format!("unsupported character '{}'", c)));
        }

        let (int_part, frac_part) = match pattern.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.contains('.') {
                    return Err(invalid("more than one decimal point"));
                }
                if frac_part.contains(',') {
                    return Err(invalid("grouping separator after decimal point"));
                }
                (int_part, frac_part)
            }
            None => (pattern, ""),
        };

        if !int_part.chars().any(|c| c == '#' || c == '0') && frac_part.is_empty() {
            return Err(invalid("no digit placeholders"));
        }

        Ok(NumberFormat {
            grouping: int_part.contains(','),
            min_int_digits: int_part.chars().filter(|c| *c == '0').count(),
            min_frac_digits: frac_part.chars().take_while(|c| *c == '0').count(),
            max_frac_digits: frac_part.len(),
        })
    }

    /// Render a number for display.
    pub fn apply(&self, n: f64) -> String {
        if n.is_nan() {
            return "#NUM!".to_string();
        }
        if n.is_infinite() {
            return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }

        // Halves round away from zero; `{:.N}` alone would round them to even.
        let scale = 10f64.powi(self.max_frac_digits as i32);
        let rounded = (n.abs() * scale).round() / scale;
        let rendered = format!("{:.*}", self.max_frac_digits, rounded);
        let (int_digits, frac_digits) = match rendered.split_once('.') {
            Some((i, f)) => (i.to_string(), f.to_string()),
            None => (rendered, String::new()),
        };

        let frac_digits = trim_fraction(&frac_digits, self.min_frac_digits);
        let is_zero = int_digits.bytes().all(|b| b == b'0') && frac_digits.bytes().all(|b| b == b'0');

        let mut int_digits = int_digits.trim_start_matches('0').to_string();
        while int_digits.len() < self.min_int_digits {
            int_digits.insert(0, '0');
        }
        if self.grouping {
            int_digits = group_thousands(&int_digits);
        }

        let mut out = String::new();
        if n < 0.0 && !is_zero {
            out.push('-');
        }
        out.push_str(&int_digits);
        if !frac_digits.is_empty() {
            out.push('.');
            out.push_str(&frac_digits);
        }
        out
    }
}

fn trim_fraction(digits: &str, min_len: usize) -> String {
    let mut end = digits.len();
    while end > min_len && digits.as_bytes()[end - 1] == b'0' {
        end -= 1;
    }
    digits[..end].to_string()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a raw number for storage and export (no display format applied).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_pattern() {
        let format = NumberFormat::parse("#,###").unwrap();
        assert_eq!(format.apply(265.0), "265");
        assert_eq!(format.apply(1500.0), "1,500");
        assert_eq!(format.apply(1234567.0), "1,234,567");
        assert_eq!(format.apply(-98765.0), "-98,765");
        assert_eq!(format.apply(1234.6), "1,235");
    }

    #[test]
    fn test_halves_round_away_from_zero() {
        let format = NumberFormat::parse("#,###").unwrap();
        assert_eq!(format.apply(2.5), "3");
        assert_eq!(format.apply(0.5), "1");
        assert_eq!(format.apply(1500.5), "1,501");
        assert_eq!(format.apply(-2.5), "-3");

        let format = NumberFormat::parse("0.0").unwrap();
        assert_eq!(format.apply(0.25), "0.3");
    }

    #[test]
    fn test_thousands_pattern_hides_zero() {
        let format = NumberFormat::parse("#,###").unwrap();
        assert_eq!(format.apply(0.0), "");
        assert_eq!(format.apply(0.4), "");
        assert_eq!(format.apply(-0.4), "");
    }

    #[test]
    fn test_forced_digits() {
        let format = NumberFormat::parse("#,##0.00").unwrap();
        assert_eq!(format.apply(0.0), "0.00");
        assert_eq!(format.apply(1234.5), "1,234.50");

        let format = NumberFormat::parse("0.##").unwrap();
        assert_eq!(format.apply(3.0), "3");
        assert_eq!(format.apply(3.14159), "3.14");
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(NumberFormat::parse("").is_err());
        assert!(NumberFormat::parse("#,##x").is_err());
        assert!(NumberFormat::parse("#.#.#").is_err());
        assert!(NumberFormat::parse(",").is_err());
    }

    #[test]
    fn test_format_number_raw() {
        assert_eq!(format_number(265.0), "265");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
    }
}
