//! Number formatting for calculator output.

use super::prefix::SiPrefix;

/// Maximum fractional digits shown by the unit formatter.
const FRACTION_DIGITS: usize = 3;

/// Separators used when rendering numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberStyle {
    /// Thousands separator, or `None` for no grouping
    pub group_separator: Option<char>,
    /// Decimal separator
    pub decimal_separator: char,
}

impl Default for NumberStyle {
    fn default() -> Self {
        Self {
            group_separator: Some(','),
            decimal_separator: '.',
        }
    }
}

impl NumberStyle {
    /// Continental style: `1.234,5`.
    pub fn continental() -> Self {
        Self {
            group_separator: Some('.'),
            decimal_separator: ',',
        }
    }

    /// Render a number with up to `max_fraction` fractional digits,
    /// trailing zeros dropped and the integer part grouped by thousands.
    pub fn render(&self, value: f64, max_fraction: usize) -> String {
        let fixed = format!("{:.*}", max_fraction, value.abs());
        let (int_part, frac_part) = match fixed.split_once('.') {
            Some((i, f)) => (i, f.trim_end_matches('0')),
            None => (fixed.as_str(), ""),
        };

        let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
        let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
        if value.is_sign_negative() && !is_zero {
            out.push('-');
        }

        let digits = int_part.len();
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                if let Some(sep) = self.group_separator {
                    out.push(sep);
                }
            }
            out.push(ch);
        }

        if !frac_part.is_empty() {
            out.push(self.decimal_separator);
            out.push_str(frac_part);
        }
        out
    }
}

/// Format a value with the best-fitting SI prefix, e.g. `4.7 kΩ`.
pub fn format_with_unit(value: f64, unit: &str) -> String {
    format_with_unit_styled(value, unit, &NumberStyle::default())
}

/// [`format_with_unit`] with explicit separators.
pub fn format_with_unit_styled(value: f64, unit: &str, style: &NumberStyle) -> String {
    if !value.is_finite() {
        return format!("{} {}", value, unit).trim_end().to_string();
    }

    let mut prefix = SiPrefix::best_for(value);
    // 999.9996 rounds to 1000 at three decimals and belongs one prefix up
    let scale = 10f64.powi(FRACTION_DIGITS as i32);
    if ((value / prefix.factor()) * scale).round().abs() >= 1000.0 * scale {
        if let Some(larger) = prefix.larger() {
            prefix = larger;
        }
    }
    let mantissa = style.render(value / prefix.factor(), FRACTION_DIGITS);
    format!("{} {}{}", mantissa, prefix.symbol(), unit)
        .trim_end()
        .to_string()
}

/// Whether a value is small or large enough to be shown in exponential form.
pub fn needs_scientific(value: f64) -> bool {
    let abs = value.abs();
    abs != 0.0 && (abs < 0.001 || abs > 10_000.0)
}

/// Format a value in exponential notation with 3 significant digits.
pub fn format_scientific(value: f64) -> String {
    format!("{:.2e}", value)
}

/// Plain number formatting: scientific for extreme magnitudes, grouped
/// fixed-point otherwise.
pub fn format_number(value: f64, style: &NumberStyle) -> String {
    if needs_scientific(value) {
        format_scientific(value)
    } else {
        style.render(value, FRACTION_DIGITS)
    }
}
