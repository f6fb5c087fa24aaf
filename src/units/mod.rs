//! Unit scaling, formatting and parsing shared by every calculator.
//!
//! - [`SiPrefix`] / [`ScaledValue`] pick the SI prefix that keeps a mantissa >= 1
//! - [`format_with_unit`] renders `4700.0, "Ω"` as `4.7 kΩ`
//! - [`format_scientific`] renders extreme magnitudes as `1.59e-4`
//! - [`parse_value`] reads SPICE-style values such as `10k`, `100n` or `4.7u`

mod format;
mod parse;
mod prefix;

pub use format::{
    format_number, format_scientific, format_with_unit, format_with_unit_styled, needs_scientific,
    NumberStyle,
};
pub use parse::{parse_optional, parse_value};
pub use prefix::{ScaledValue, SiPrefix};
