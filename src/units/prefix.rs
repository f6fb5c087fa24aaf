//! SI prefix selection.

use std::fmt;

/// SI prefixes used for display, from nano to giga.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SiPrefix {
    Nano,
    Micro,
    Milli,
    None,
    Kilo,
    Mega,
    Giga,
}

impl SiPrefix {
    /// All prefixes, smallest first.
    pub const ALL: [SiPrefix; 7] = [
        SiPrefix::Nano,
        SiPrefix::Micro,
        SiPrefix::Milli,
        SiPrefix::None,
        SiPrefix::Kilo,
        SiPrefix::Mega,
        SiPrefix::Giga,
    ];

    /// Multiplier applied to a mantissa to get the base-unit value.
    pub fn factor(self) -> f64 {
        match self {
            SiPrefix::Nano => 1e-9,
            SiPrefix::Micro => 1e-6,
            SiPrefix::Milli => 1e-3,
            SiPrefix::None => 1.0,
            SiPrefix::Kilo => 1e3,
            SiPrefix::Mega => 1e6,
            SiPrefix::Giga => 1e9,
        }
    }

    /// Symbol printed in front of the unit.
    pub fn symbol(self) -> &'static str {
        match self {
            SiPrefix::Nano => "n",
            SiPrefix::Micro => "µ",
            SiPrefix::Milli => "m",
            SiPrefix::None => "",
            SiPrefix::Kilo => "k",
            SiPrefix::Mega => "M",
            SiPrefix::Giga => "G",
        }
    }

    /// Pick the largest prefix whose scaled mantissa is still >= 1.
    ///
    /// Zero and non-finite values stay unscaled. Anything below a micro
    /// falls through to nano, even when the mantissa ends up < 1.
    pub fn best_for(value: f64) -> Self {
        let abs = value.abs();
        if abs == 0.0 || !abs.is_finite() {
            return SiPrefix::None;
        }

        if abs >= 1e9 {
            SiPrefix::Giga
        } else if abs >= 1e6 {
            SiPrefix::Mega
        } else if abs >= 1e3 {
            SiPrefix::Kilo
        } else if abs >= 1.0 {
            SiPrefix::None
        } else if abs >= 1e-3 {
            SiPrefix::Milli
        } else if abs >= 1e-6 {
            SiPrefix::Micro
        } else {
            SiPrefix::Nano
        }
    }

    /// The next prefix up (×1000), if any.
    pub fn larger(self) -> Option<SiPrefix> {
        let index = SiPrefix::ALL.iter().position(|&p| p == self)?;
        SiPrefix::ALL.get(index + 1).copied()
    }
}

impl fmt::Display for SiPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A value split into a display mantissa and an SI prefix.
///
/// This is the shape of an input field paired with its unit selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledValue {
    pub mantissa: f64,
    pub prefix: SiPrefix,
}

impl ScaledValue {
    /// Create a scaled value from a mantissa and prefix.
    pub fn new(mantissa: f64, prefix: SiPrefix) -> Self {
        Self { mantissa, prefix }
    }

    /// Rescale a base-unit value onto its best-fitting prefix.
    pub fn from_base(value: f64) -> Self {
        let prefix = SiPrefix::best_for(value);
        Self {
            mantissa: value / prefix.factor(),
            prefix,
        }
    }

    /// Value in base units.
    pub fn to_base(self) -> f64 {
        self.mantissa * self.prefix.factor()
    }
}
