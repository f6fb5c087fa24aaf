//! Calculation modes and mode switching.

use std::fmt;
use std::str::FromStr;

use crate::error::CalcError;
use crate::solvers::network::{NetworkMode, SourceKind};

/// Which calculator is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CalculationMode {
    #[default]
    Series,
    Parallel,
    VoltageDivider,
    Led,
    OhmsLaw,
    RcTime,
    BatteryLife,
    ColorCode,
}

impl CalculationMode {
    pub const ALL: [CalculationMode; 8] = [
        CalculationMode::Series,
        CalculationMode::Parallel,
        CalculationMode::VoltageDivider,
        CalculationMode::Led,
        CalculationMode::OhmsLaw,
        CalculationMode::RcTime,
        CalculationMode::BatteryLife,
        CalculationMode::ColorCode,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CalculationMode::Series => "series",
            CalculationMode::Parallel => "parallel",
            CalculationMode::VoltageDivider => "voltage-divider",
            CalculationMode::Led => "led",
            CalculationMode::OhmsLaw => "ohms-law",
            CalculationMode::RcTime => "rc-time",
            CalculationMode::BatteryLife => "battery-life",
            CalculationMode::ColorCode => "color-code",
        }
    }

    /// The network topology, for the two network modes.
    pub fn network_mode(self) -> Option<NetworkMode> {
        match self {
            CalculationMode::Series => Some(NetworkMode::Series),
            CalculationMode::Parallel => Some(NetworkMode::Parallel),
            _ => None,
        }
    }
}

impl fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalculationMode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        CalculationMode::ALL
            .into_iter()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| CalcError::UnknownMode {
                name: s.trim().to_string(),
            })
    }
}

/// Side effects of switching from one mode to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChangeEffects {
    /// New source kind for the resistor network, when entering a network mode
    pub reset_source_kind: Option<SourceKind>,
    /// Whether the displayed result (or error) must be dropped
    pub discard_results: bool,
}

/// Compute what a mode switch does.
///
/// Inputs are mode-local and always survive the switch; only the shown
/// result is discarded. Entering series or parallel resets the network
/// source to that topology's usual kind (voltage for series, current for
/// parallel).
pub fn on_mode_change(old: CalculationMode, new: CalculationMode) -> ModeChangeEffects {
    if old == new {
        return ModeChangeEffects {
            reset_source_kind: None,
            discard_results: false,
        };
    }

    ModeChangeEffects {
        reset_source_kind: new.network_mode().map(NetworkMode::default_source_kind),
        discard_results: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for mode in CalculationMode::ALL {
            assert_eq!(mode.name().parse::<CalculationMode>(), Ok(mode));
        }
        assert_eq!("Ohms_Law".parse::<CalculationMode>(), Ok(CalculationMode::OhmsLaw));
        assert!(matches!(
            "bode".parse::<CalculationMode>(),
            Err(CalcError::UnknownMode { .. })
        ));
    }

    #[test]
    fn test_mode_change_effects() {
        let effects = on_mode_change(CalculationMode::Series, CalculationMode::Parallel);
        assert_eq!(effects.reset_source_kind, Some(SourceKind::Current));
        assert!(effects.discard_results);

        let effects = on_mode_change(CalculationMode::Led, CalculationMode::Series);
        assert_eq!(effects.reset_source_kind, Some(SourceKind::Voltage));

        let effects = on_mode_change(CalculationMode::Series, CalculationMode::OhmsLaw);
        assert_eq!(effects.reset_source_kind, None);
        assert!(effects.discard_results);

        let effects = on_mode_change(CalculationMode::Parallel, CalculationMode::Parallel);
        assert_eq!(effects.reset_source_kind, None);
        assert!(!effects.discard_results);
    }
}
