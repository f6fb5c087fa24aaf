//! Resistor colour code decoding.
//!
//! Band layout:
//!
//! | bands | digits | multiplier | tolerance |
//! |-------|--------|------------|-----------|
//! | 4     | 0, 1   | 2          | 3         |
//! | 5     | 0, 1, 2| 3          | 4         |
//!
//! A colour that has no value for its band role (e.g. gold as a digit, or
//! yellow as a tolerance) decodes as 0 for digits and multipliers and as
//! ±20% for the tolerance, unless strict checking is enabled.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::CalcConfig;
use crate::error::{CalcError, Result};
use crate::units::format_with_unit;

/// Tolerance assumed when the tolerance band is missing or unusable.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 20.0;

/// Band colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandColor {
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Grey,
    White,
    Gold,
    Silver,
}

impl BandColor {
    pub const ALL: [BandColor; 12] = [
        BandColor::Black,
        BandColor::Brown,
        BandColor::Red,
        BandColor::Orange,
        BandColor::Yellow,
        BandColor::Green,
        BandColor::Blue,
        BandColor::Violet,
        BandColor::Grey,
        BandColor::White,
        BandColor::Gold,
        BandColor::Silver,
    ];

    /// Significant digit, black through white.
    pub fn digit(self) -> Option<u32> {
        match self {
            BandColor::Black => Some(0),
            BandColor::Brown => Some(1),
            BandColor::Red => Some(2),
            BandColor::Orange => Some(3),
            BandColor::Yellow => Some(4),
            BandColor::Green => Some(5),
            BandColor::Blue => Some(6),
            BandColor::Violet => Some(7),
            BandColor::Grey => Some(8),
            BandColor::White => Some(9),
            BandColor::Gold | BandColor::Silver => None,
        }
    }

    /// Multiplier: `10^digit` for black through white, 0.1 and 0.01 for gold and silver.
    pub fn multiplier(self) -> Option<f64> {
        match self {
            BandColor::Gold => Some(0.1),
            BandColor::Silver => Some(0.01),
            other => other.digit().map(|d| 10f64.powi(d as i32)),
        }
    }

    /// Tolerance in percent.
    pub fn tolerance(self) -> Option<f64> {
        match self {
            BandColor::Brown => Some(1.0),
            BandColor::Red => Some(2.0),
            BandColor::Green => Some(0.5),
            BandColor::Blue => Some(0.25),
            BandColor::Violet => Some(0.1),
            BandColor::Gold => Some(5.0),
            BandColor::Silver => Some(10.0),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BandColor::Black => "black",
            BandColor::Brown => "brown",
            BandColor::Red => "red",
            BandColor::Orange => "orange",
            BandColor::Yellow => "yellow",
            BandColor::Green => "green",
            BandColor::Blue => "blue",
            BandColor::Violet => "violet",
            BandColor::Grey => "grey",
            BandColor::White => "white",
            BandColor::Gold => "gold",
            BandColor::Silver => "silver",
        }
    }

    /// Check if this colour has a value for the given role.
    pub fn fits(self, role: BandRole) -> bool {
        match role {
            BandRole::Digit => self.digit().is_some(),
            BandRole::Multiplier => self.multiplier().is_some(),
            BandRole::Tolerance => self.tolerance().is_some(),
        }
    }
}

impl fmt::Display for BandColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BandColor {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        let name = match lower.as_str() {
            "gray" => "grey",
            "purple" => "violet",
            other => other,
        };
        BandColor::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| CalcError::UnknownColor {
                name: s.trim().to_string(),
            })
    }
}

/// Meaning of a band position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandRole {
    Digit,
    Multiplier,
    Tolerance,
}

/// Number of bands on the resistor body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandCount {
    Four,
    Five,
}

impl BandCount {
    pub fn len(self) -> usize {
        match self {
            BandCount::Four => 4,
            BandCount::Five => 5,
        }
    }

    /// Role of every band position, in order.
    pub fn roles(self) -> Vec<BandRole> {
        let digits = self.len() - 2;
        let mut roles = vec![BandRole::Digit; digits];
        roles.push(BandRole::Multiplier);
        roles.push(BandRole::Tolerance);
        roles
    }
}

impl TryFrom<usize> for BandCount {
    type Error = CalcError;

    fn try_from(count: usize) -> Result<Self> {
        match count {
            4 => Ok(BandCount::Four),
            5 => Ok(BandCount::Five),
            _ => Err(CalcError::InvalidBandCount { count }),
        }
    }
}

/// Colours a UI should offer for a band role.
pub fn allowed_colors(role: BandRole) -> Vec<BandColor> {
    BandColor::ALL
        .into_iter()
        .filter(|c| c.fits(role))
        .collect()
}

/// Check every band against its role.
pub fn validate_bands(count: BandCount, bands: &[Option<BandColor>]) -> Result<()> {
    if bands.len() != count.len() {
        return Err(CalcError::invalid_configuration(format!(
            "expected {} bands, got {}",
            count.len(),
            bands.len()
        )));
    }
    for (position, (band, role)) in bands.iter().zip(count.roles()).enumerate() {
        match band {
            None => {
                return Err(CalcError::invalid_configuration(format!(
                    "band {} has no colour",
                    position + 1
                )))
            }
            Some(color) if !color.fits(role) => {
                return Err(CalcError::invalid_configuration(format!(
                    "{} is not valid for band {} ({:?})",
                    color,
                    position + 1,
                    role
                )))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Decoded resistance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCodeResult {
    /// Resistance (Ω)
    pub resistance: f64,
    /// Tolerance (±%)
    pub tolerance_percent: f64,
}

impl ColorCodeResult {
    /// Lowest resistance within tolerance.
    pub fn min(&self) -> f64 {
        self.resistance * (1.0 - self.tolerance_percent / 100.0)
    }

    /// Highest resistance within tolerance.
    pub fn max(&self) -> f64 {
        self.resistance * (1.0 + self.tolerance_percent / 100.0)
    }
}

impl fmt::Display for ColorCodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ±{}%",
            format_with_unit(self.resistance, "Ω"),
            self.tolerance_percent
        )
    }
}

/// Decode with the default (lenient) configuration.
pub fn decode(count: BandCount, bands: &[Option<BandColor>]) -> Result<ColorCodeResult> {
    decode_with(count, bands, &CalcConfig::default())
}

/// Decode a band sequence.
///
/// Lenient by default: missing or incompatible bands degrade to 0 / ±20%
/// and the call always succeeds. With `strict_color_bands` set, the bands
/// are validated first.
pub fn decode_with(
    count: BandCount,
    bands: &[Option<BandColor>],
    config: &CalcConfig,
) -> Result<ColorCodeResult> {
    if config.strict_color_bands {
        validate_bands(count, bands)?;
    }

    let band = |i: usize| bands.get(i).copied().flatten();
    let digits = count.len() - 2;

    let significand = (0..digits).fold(0u32, |acc, i| {
        acc * 10 + band(i).and_then(BandColor::digit).unwrap_or(0)
    });
    let multiplier = band(digits).and_then(BandColor::multiplier).unwrap_or(0.0);
    let tolerance_percent = band(digits + 1)
        .and_then(BandColor::tolerance)
        .unwrap_or(DEFAULT_TOLERANCE_PERCENT);

    let result = ColorCodeResult {
        resistance: significand as f64 * multiplier,
        tolerance_percent,
    };
    debug!(
        resistance = result.resistance,
        tolerance = result.tolerance_percent,
        "colour code decoded"
    );
    Ok(result)
}

/// Parse colour names; blank entries become missing bands.
pub fn parse_bands<S: AsRef<str>>(names: &[S]) -> Result<Vec<Option<BandColor>>> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            if name.trim().is_empty() {
                Ok(None)
            } else {
                name.parse().map(Some)
            }
        })
        .collect()
}
