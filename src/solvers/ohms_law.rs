//! Ohm's law and power solver.
//!
//! Exactly two of V, I, R and P must be known. The remaining two follow from
//! `V = I·R` and `P = V·I`:
//!
//! | known | derived |
//! |-------|---------|
//! | V, I  | R = V/I,  P = V·I   |
//! | V, R  | I = V/R,  P = V²/R  |
//! | V, P  | I = P/V,  R = V²/P  |
//! | I, R  | V = I·R,  P = I²·R  |
//! | I, P  | V = P/I,  R = P/I²  |
//! | R, P  | V = √(P·R), I = √(P/R) |
//!
//! Derived values are rounded to the configured number of decimals, so a
//! value written back into the form is exactly what the user sees.

use std::fmt;

use tracing::debug;

use crate::config::CalcConfig;
use crate::error::{CalcError, Result};
use crate::session::SolveState;

use super::count_known;

/// The four Ohm's-law quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OhmsField {
    Voltage,
    Current,
    Resistance,
    Power,
}

impl OhmsField {
    pub const ALL: [OhmsField; 4] = [
        OhmsField::Voltage,
        OhmsField::Current,
        OhmsField::Resistance,
        OhmsField::Power,
    ];

    pub fn unit(self) -> &'static str {
        match self {
            OhmsField::Voltage => "V",
            OhmsField::Current => "A",
            OhmsField::Resistance => "Ω",
            OhmsField::Power => "W",
        }
    }
}

impl fmt::Display for OhmsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OhmsField::Voltage => "voltage",
            OhmsField::Current => "current",
            OhmsField::Resistance => "resistance",
            OhmsField::Power => "power",
        };
        f.pad(name)
    }
}

/// Known quantities; `None` means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OhmsLawInputs {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub resistance: Option<f64>,
    pub power: Option<f64>,
}

/// All four quantities after a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OhmsLawResult {
    pub voltage: f64,
    pub current: f64,
    pub resistance: f64,
    pub power: f64,
    /// The two quantities that were solved for
    pub derived: [OhmsField; 2],
}

impl OhmsLawResult {
    pub fn get(&self, field: OhmsField) -> f64 {
        match field {
            OhmsField::Voltage => self.voltage,
            OhmsField::Current => self.current,
            OhmsField::Resistance => self.resistance,
            OhmsField::Power => self.power,
        }
    }
}

/// Round through the display format, as the value would be re-read from a field.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value)
        .parse::<f64>()
        .unwrap_or(value)
}

fn nonzero(value: f64, what: &str) -> Result<f64> {
    if value == 0.0 {
        Err(CalcError::division_by_zero(format!("{} is zero", what)))
    } else {
        Ok(value)
    }
}

impl OhmsLawInputs {
    pub fn get(&self, field: OhmsField) -> Option<f64> {
        match field {
            OhmsField::Voltage => self.voltage,
            OhmsField::Current => self.current,
            OhmsField::Resistance => self.resistance,
            OhmsField::Power => self.power,
        }
    }

    pub fn set(&mut self, field: OhmsField, value: Option<f64>) {
        let slot = match field {
            OhmsField::Voltage => &mut self.voltage,
            OhmsField::Current => &mut self.current,
            OhmsField::Resistance => &mut self.resistance,
            OhmsField::Power => &mut self.power,
        };
        *slot = value;
    }

    /// Solve with the default configuration.
    pub fn solve(&self) -> Result<OhmsLawResult> {
        self.solve_with(&CalcConfig::default())
    }

    /// Derive the two unknown quantities.
    pub fn solve_with(&self, config: &CalcConfig) -> Result<OhmsLawResult> {
        use OhmsField::*;

        let known = count_known(&[self.voltage, self.current, self.resistance, self.power]);
        if known != 2 {
            return Err(CalcError::insufficient("Ohm's law", 2, known));
        }

        let inputs = (self.voltage, self.current, self.resistance, self.power);
        let (v, i, r, p, derived) = match inputs {
            (Some(v), Some(i), None, None) => {
                let i = nonzero(i, "current")?;
                (v, i, v / i, v * i, [Resistance, Power])
            }
            (Some(v), None, Some(r), None) => {
                let r = nonzero(r, "resistance")?;
                (v, v / r, r, v * v / r, [Current, Power])
            }
            (Some(v), None, None, Some(p)) => {
                let v = nonzero(v, "voltage")?;
                let p = nonzero(p, "power")?;
                (v, p / v, v * v / p, p, [Current, Resistance])
            }
            (None, Some(i), Some(r), None) => (i * r, i, r, i * i * r, [Voltage, Power]),
            (None, Some(i), None, Some(p)) => {
                let i = nonzero(i, "current")?;
                (p / i, i, p / (i * i), p, [Voltage, Resistance])
            }
            (None, None, Some(r), Some(p)) => {
                let r = nonzero(r, "resistance")?;
                if p * r < 0.0 {
                    return Err(CalcError::invalid_configuration(
                        "resistance and power must have the same sign",
                    ));
                }
                ((p * r).sqrt(), (p / r).sqrt(), r, p, [Voltage, Current])
            }
            _ => return Err(CalcError::insufficient("Ohm's law", 2, known)),
        };

        let mut result = OhmsLawResult {
            voltage: v,
            current: i,
            resistance: r,
            power: p,
            derived,
        };
        for field in derived {
            let rounded = round_to(result.get(field), config.display_decimals);
            match field {
                Voltage => result.voltage = rounded,
                Current => result.current = rounded,
                Resistance => result.resistance = rounded,
                Power => result.power = rounded,
            }
        }

        debug!(
            voltage = result.voltage,
            current = result.current,
            resistance = result.resistance,
            power = result.power,
            "ohm's law solved"
        );
        Ok(result)
    }
}

/// Ohm's-law input form with derived-field marks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OhmsLawForm {
    inputs: OhmsLawInputs,
    state: SolveState<OhmsField>,
}

impl OhmsLawForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &OhmsLawInputs {
        &self.inputs
    }

    pub fn state(&self) -> &SolveState<OhmsField> {
        &self.state
    }

    /// Edit a field, clearing the marks left by the previous solve.
    pub fn set(&mut self, field: OhmsField, value: Option<f64>) {
        self.inputs.set(field, value);
        self.state.edit();
    }

    /// Solve and write both derived values back into the form.
    pub fn solve(&mut self, config: &CalcConfig) -> Result<OhmsLawResult> {
        let mut inputs = self.inputs;
        for &field in self.state.derived() {
            inputs.set(field, None);
        }

        let result = inputs.solve_with(config)?;
        for field in result.derived {
            self.inputs.set(field, Some(result.get(field)));
        }
        self.state = SolveState::solved(result.derived);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn known(pairs: &[(OhmsField, f64)]) -> OhmsLawInputs {
        let mut inputs = OhmsLawInputs::default();
        for &(field, value) in pairs {
            inputs.set(field, Some(value));
        }
        inputs
    }

    #[test]
    fn test_voltage_and_current() {
        let result = known(&[(OhmsField::Voltage, 10.0), (OhmsField::Current, 2.0)])
            .solve()
            .unwrap();
        assert_eq!(result.resistance, 5.0);
        assert_eq!(result.power, 20.0);
        assert_eq!(result.derived, [OhmsField::Resistance, OhmsField::Power]);
    }

    #[test]
    fn test_all_six_pairings() {
        use OhmsField::*;
        // V = 12, I = 0.5, R = 24, P = 6
        let cases = [
            [(Voltage, 12.0), (Current, 0.5)],
            [(Voltage, 12.0), (Resistance, 24.0)],
            [(Voltage, 12.0), (Power, 6.0)],
            [(Current, 0.5), (Resistance, 24.0)],
            [(Current, 0.5), (Power, 6.0)],
            [(Resistance, 24.0), (Power, 6.0)],
        ];
        for case in cases {
            let result = known(&case).solve().unwrap();
            assert_relative_eq!(result.voltage, 12.0, max_relative = 1e-9);
            assert_relative_eq!(result.current, 0.5, max_relative = 1e-9);
            assert_relative_eq!(result.resistance, 24.0, max_relative = 1e-9);
            assert_relative_eq!(result.power, 6.0, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_rounds_derived_values() {
        let result = known(&[(OhmsField::Voltage, 1.0), (OhmsField::Current, 3.0)])
            .solve()
            .unwrap();
        assert_eq!(result.resistance, 0.3333);
        assert_eq!(result.voltage, 1.0);

        let config = CalcConfig::new().with_display_decimals(2);
        let result = known(&[(OhmsField::Voltage, 1.0), (OhmsField::Current, 3.0)])
            .solve_with(&config)
            .unwrap();
        assert_eq!(result.resistance, 0.33);
    }

    #[test]
    fn test_requires_exactly_two() {
        let err = known(&[(OhmsField::Voltage, 1.0)]).solve().unwrap_err();
        assert_eq!(err, CalcError::insufficient("Ohm's law", 2, 1));
        assert_eq!(err.to_string(), "Ohm's law: need exactly 2 known values, got 1");

        let err = known(&[
            (OhmsField::Voltage, 1.0),
            (OhmsField::Current, 1.0),
            (OhmsField::Power, 1.0),
        ])
        .solve()
        .unwrap_err();
        assert_eq!(err, CalcError::insufficient("Ohm's law", 2, 3));
    }

    #[test]
    fn test_zero_denominators() {
        let err = known(&[(OhmsField::Voltage, 5.0), (OhmsField::Current, 0.0)])
            .solve()
            .unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero { .. }));

        let err = known(&[(OhmsField::Resistance, 0.0), (OhmsField::Power, 1.0)])
            .solve()
            .unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero { .. }));

        let err = known(&[(OhmsField::Resistance, -10.0), (OhmsField::Power, 1.0)])
            .solve()
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_form_edit_clears_marks() {
        let config = CalcConfig::default();
        let mut form = OhmsLawForm::new();
        form.set(OhmsField::Voltage, Some(10.0));
        form.set(OhmsField::Current, Some(2.0));
        form.solve(&config).unwrap();

        assert!(form.state().is_derived(OhmsField::Resistance));
        assert!(form.state().is_derived(OhmsField::Power));
        assert_eq!(form.inputs().resistance, Some(5.0));

        // Re-solving a solved form is stable
        let again = form.solve(&config).unwrap();
        assert_eq!(again.power, 20.0);

        form.set(OhmsField::Voltage, Some(20.0));
        assert!(!form.state().is_derived(OhmsField::Resistance));
        assert!(!form.state().is_solved());
    }
}
