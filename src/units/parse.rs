//! Value parsing with SI suffixes.

use crate::error::{CalcError, Result};

/// Parse a number string with optional SI suffix (`p n u µ m k K M G`).
///
/// Returns `None` for empty or malformed input.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (num_str, multiplier) = match text.chars().last() {
        Some(last) => {
            let mult = match last {
                'p' => 1e-12,
                'n' => 1e-9,
                'u' | 'µ' => 1e-6,
                'm' => 1e-3,
                'k' | 'K' => 1e3,
                'M' => 1e6,
                'G' => 1e9,
                _ => 1.0,
            };
            if mult != 1.0 {
                (&text[..text.len() - last.len_utf8()], mult)
            } else {
                (text, 1.0)
            }
        }
        None => (text, 1.0),
    };

    num_str
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v * multiplier)
}

/// Parse an input field: blank means "unknown", anything else must be a number.
pub fn parse_optional(text: &str) -> Result<Option<f64>> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse_value(text)
        .map(Some)
        .ok_or_else(|| CalcError::invalid_value(text.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
        match (a, b) {
            (Some(x), Some(y)) => (x - y).abs() < x.abs() * 1e-10 + 1e-15,
            (None, None) => true,
            _ => false,
        }
    }

    #[test]
    fn test_parse_value() {
        assert!(approx_eq(parse_value("10k"), Some(10_000.0)));
        assert!(approx_eq(parse_value("100n"), Some(100e-9)));
        assert!(approx_eq(parse_value("4.7u"), Some(4.7e-6)));
        assert!(approx_eq(parse_value("4.7µ"), Some(4.7e-6)));
        assert!(approx_eq(parse_value("1M"), Some(1_000_000.0)));
        assert!(approx_eq(parse_value("2.2"), Some(2.2)));
        assert!(approx_eq(parse_value("1e-9"), Some(1e-9)));
        assert!(approx_eq(parse_value(" 20m "), Some(0.02)));
        assert!(approx_eq(parse_value("abc"), None));
        assert!(approx_eq(parse_value("inf"), None));
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional("   "), Ok(None));
        assert_eq!(parse_optional("0"), Ok(Some(0.0)));
        assert_eq!(parse_optional("x1"), Err(CalcError::invalid_value("x1")));
    }
}
