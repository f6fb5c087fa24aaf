//! Voltage divider solver.
//!
//! ```text
//!   Vin ──[Ra]──┬── Vout
//!               │
//!              [Rb]
//!               │
//!              GND          Vout = Vin · Rb / (Ra + Rb)
//! ```
//!
//! Exactly three of the four quantities must be known; the fourth is derived.

use std::fmt;

use tracing::debug;

use crate::config::CalcConfig;
use crate::error::{CalcError, Result};
use crate::session::SolveState;

use super::count_known;

/// The four divider quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DividerField {
    Vin,
    Ra,
    Rb,
    Vout,
}

impl fmt::Display for DividerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DividerField::Vin => "Vin",
            DividerField::Ra => "Ra",
            DividerField::Rb => "Rb",
            DividerField::Vout => "Vout",
        };
        f.write_str(name)
    }
}

/// Known divider quantities; `None` means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DividerInputs {
    pub vin: Option<f64>,
    pub ra: Option<f64>,
    pub rb: Option<f64>,
    pub vout: Option<f64>,
}

impl DividerInputs {
    pub fn get(&self, field: DividerField) -> Option<f64> {
        match field {
            DividerField::Vin => self.vin,
            DividerField::Ra => self.ra,
            DividerField::Rb => self.rb,
            DividerField::Vout => self.vout,
        }
    }

    pub fn set(&mut self, field: DividerField, value: Option<f64>) {
        let slot = match field {
            DividerField::Vin => &mut self.vin,
            DividerField::Ra => &mut self.ra,
            DividerField::Rb => &mut self.rb,
            DividerField::Vout => &mut self.vout,
        };
        *slot = value;
    }

    /// Solve with the default configuration.
    pub fn solve(&self) -> Result<DividerResult> {
        self.solve_with(&CalcConfig::default())
    }

    /// Derive the single missing quantity.
    pub fn solve_with(&self, config: &CalcConfig) -> Result<DividerResult> {
        let known = count_known(&[self.vin, self.ra, self.rb, self.vout]);
        if known != 3 {
            return Err(CalcError::insufficient("Voltage divider", 3, known));
        }

        let result = match (self.vin, self.ra, self.rb, self.vout) {
            (Some(vin), Some(ra), Some(rb), None) => {
                let sum = ra + rb;
                if sum == 0.0 {
                    return Err(CalcError::division_by_zero("Ra + Rb is zero"));
                }
                DividerResult::new(vin, ra, rb, vin * rb / sum, DividerField::Vout)
            }
            (Some(vin), None, Some(rb), Some(vout)) => {
                if vout == 0.0 || (vin - vout).abs() < config.equality_tolerance {
                    return Err(CalcError::division_by_zero(
                        "Vout must be non-zero and differ from Vin",
                    ));
                }
                let ra = rb * (vin / vout - 1.0);
                if ra < 0.0 {
                    return Err(CalcError::negative("Ra", ra));
                }
                DividerResult::new(vin, ra, rb, vout, DividerField::Ra)
            }
            (Some(vin), Some(ra), None, Some(vout)) => {
                if (vin - vout).abs() < config.equality_tolerance {
                    return Err(CalcError::division_by_zero("Vin equals Vout"));
                }
                let rb = vout * ra / (vin - vout);
                if rb < 0.0 {
                    return Err(CalcError::negative("Rb", rb));
                }
                DividerResult::new(vin, ra, rb, vout, DividerField::Rb)
            }
            (None, Some(ra), Some(rb), Some(vout)) => {
                if rb == 0.0 {
                    return Err(CalcError::division_by_zero("Rb is zero"));
                }
                DividerResult::new(vout * (ra + rb) / rb, ra, rb, vout, DividerField::Vin)
            }
            _ => return Err(CalcError::insufficient("Voltage divider", 3, known)),
        };

        debug!(derived = %result.derived, value = result.get(result.derived), "divider solved");
        Ok(result)
    }
}

/// A fully determined divider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DividerResult {
    pub vin: f64,
    pub ra: f64,
    pub rb: f64,
    pub vout: f64,
    /// The quantity that was solved for
    pub derived: DividerField,
}

impl DividerResult {
    fn new(vin: f64, ra: f64, rb: f64, vout: f64, derived: DividerField) -> Self {
        Self {
            vin,
            ra,
            rb,
            vout,
            derived,
        }
    }

    pub fn get(&self, field: DividerField) -> f64 {
        match field {
            DividerField::Vin => self.vin,
            DividerField::Ra => self.ra,
            DividerField::Rb => self.rb,
            DividerField::Vout => self.vout,
        }
    }

    /// Divider ratio Vout / Vin.
    pub fn ratio(&self) -> f64 {
        if self.vin == 0.0 {
            0.0
        } else {
            self.vout / self.vin
        }
    }
}

/// Divider input form: values plus the derived-field marks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DividerForm {
    inputs: DividerInputs,
    state: SolveState<DividerField>,
}

impl DividerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &DividerInputs {
        &self.inputs
    }

    pub fn state(&self) -> &SolveState<DividerField> {
        &self.state
    }

    /// Edit a field. Any edit discards the previous solution marks.
    pub fn set(&mut self, field: DividerField, value: Option<f64>) {
        self.inputs.set(field, value);
        self.state.edit();
    }

    /// Solve and write the derived value back into its field.
    ///
    /// A field derived by the previous solve counts as unknown, so solving
    /// twice in a row gives the same answer. On error the form is unchanged.
    pub fn solve(&mut self, config: &CalcConfig) -> Result<DividerResult> {
        let mut inputs = self.inputs;
        for &field in self.state.derived() {
            inputs.set(field, None);
        }

        let result = inputs.solve_with(config)?;
        self.inputs
            .set(result.derived, Some(result.get(result.derived)));
        self.state = SolveState::solved([result.derived]);
        Ok(result)
    }
}
