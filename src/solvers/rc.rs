//! RC circuit calculator.
//!
//! Two sub-modes share the time constant `τ = R·C`:
//!
//! - **Filter**: given two of R, C and the cutoff frequency, derive the third
//!   from `fc = 1 / (2π·R·C)`.
//! - **Charging**: a capacitor charging through R from a step of `Vin`
//!   follows `Vc(t) = Vin · (1 − e^(−t/τ))`. Given a target voltage, solve for
//!   the time `t = −τ · ln(1 − Vtarget/Vin)`; given a time, solve for the
//!   voltage. Every charging solve also samples the curve over `[0, 5τ]` for
//!   plotting.

use std::f64::consts::PI;
use std::fmt;

use tracing::debug;

use crate::config::CalcConfig;
use crate::error::{CalcError, Result};
use crate::session::SolveState;
use crate::units::ScaledValue;

use super::count_known;

// ============ Filter ============

/// The three RC filter quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RcField {
    Resistance,
    Capacitance,
    Frequency,
}

impl RcField {
    pub fn unit(self) -> &'static str {
        match self {
            RcField::Resistance => "Ω",
            RcField::Capacitance => "F",
            RcField::Frequency => "Hz",
        }
    }
}

impl fmt::Display for RcField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RcField::Resistance => "resistance",
            RcField::Capacitance => "capacitance",
            RcField::Frequency => "cutoff frequency",
        };
        f.write_str(name)
    }
}

/// Known filter quantities, each with its own unit prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RcFilterInputs {
    pub resistance: Option<ScaledValue>,
    pub capacitance: Option<ScaledValue>,
    pub frequency: Option<ScaledValue>,
}

/// A solved RC filter, in base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcFilterResult {
    pub resistance: f64,
    pub capacitance: f64,
    pub cutoff_frequency: f64,
    pub time_constant: f64,
    /// The quantity that was solved for
    pub derived: RcField,
    /// The derived quantity rescaled onto its best-fitting prefix
    pub derived_scaled: ScaledValue,
}

impl RcFilterInputs {
    pub fn get(&self, field: RcField) -> Option<ScaledValue> {
        match field {
            RcField::Resistance => self.resistance,
            RcField::Capacitance => self.capacitance,
            RcField::Frequency => self.frequency,
        }
    }

    pub fn set(&mut self, field: RcField, value: Option<ScaledValue>) {
        let slot = match field {
            RcField::Resistance => &mut self.resistance,
            RcField::Capacitance => &mut self.capacitance,
            RcField::Frequency => &mut self.frequency,
        };
        *slot = value;
    }

    /// Derive the missing filter quantity.
    pub fn solve(&self) -> Result<RcFilterResult> {
        let r = self.resistance.map(ScaledValue::to_base);
        let c = self.capacitance.map(ScaledValue::to_base);
        let f = self.frequency.map(ScaledValue::to_base);

        let known = count_known(&[r, c, f]);
        if known != 2 {
            return Err(CalcError::insufficient("RC filter", 2, known));
        }

        let (r, c, f, derived) = match (r, c, f) {
            (Some(r), Some(c), None) => {
                if r * c == 0.0 {
                    return Err(CalcError::division_by_zero("R·C is zero"));
                }
                (r, c, 1.0 / (2.0 * PI * r * c), RcField::Frequency)
            }
            (Some(r), None, Some(f)) => {
                if f == 0.0 || r == 0.0 {
                    return Err(CalcError::division_by_zero("R and f must be non-zero"));
                }
                (r, 1.0 / (2.0 * PI * r * f), f, RcField::Capacitance)
            }
            (None, Some(c), Some(f)) => {
                if f == 0.0 || c == 0.0 {
                    return Err(CalcError::division_by_zero("C and f must be non-zero"));
                }
                (1.0 / (2.0 * PI * c * f), c, f, RcField::Resistance)
            }
            _ => return Err(CalcError::insufficient("RC filter", 2, known)),
        };

        let derived_value = match derived {
            RcField::Resistance => r,
            RcField::Capacitance => c,
            RcField::Frequency => f,
        };
        let result = RcFilterResult {
            resistance: r,
            capacitance: c,
            cutoff_frequency: f,
            time_constant: r * c,
            derived,
            derived_scaled: ScaledValue::from_base(derived_value),
        };

        debug!(
            %derived,
            value = derived_value,
            time_constant = result.time_constant,
            "rc filter solved"
        );
        Ok(result)
    }
}

/// RC filter form with derived-field marks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RcFilterForm {
    inputs: RcFilterInputs,
    state: SolveState<RcField>,
}

impl RcFilterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &RcFilterInputs {
        &self.inputs
    }

    pub fn state(&self) -> &SolveState<RcField> {
        &self.state
    }

    pub fn set(&mut self, field: RcField, value: Option<ScaledValue>) {
        self.inputs.set(field, value);
        self.state.edit();
    }

    /// Solve and write the rescaled derived value back into its field.
    pub fn solve(&mut self) -> Result<RcFilterResult> {
        let mut inputs = self.inputs;
        for &field in self.state.derived() {
            inputs.set(field, None);
        }

        let result = inputs.solve()?;
        self.inputs.set(result.derived, Some(result.derived_scaled));
        self.state = SolveState::solved([result.derived]);
        Ok(result)
    }
}

// ============ Charging ============

/// One sample of the charging curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargePoint {
    /// Seconds since the step
    pub time: f64,
    /// Capacitor voltage
    pub voltage: f64,
}

/// Capacitor voltage `t` seconds after a step of `vin`.
pub fn charge_voltage(vin: f64, tau: f64, t: f64) -> f64 {
    vin * (1.0 - (-t / tau).exp())
}

/// Time for the capacitor to reach `target` volts.
///
/// Requires `0 < target < vin`.
pub fn time_to_reach(vin: f64, tau: f64, target: f64) -> Result<f64> {
    if target <= 0.0 {
        return Err(CalcError::invalid_configuration("target must be positive"));
    }
    if target >= vin {
        return Err(CalcError::invalid_configuration(
            "target must be below supply",
        ));
    }
    Ok(-tau * (1.0 - target / vin).ln())
}

/// Sample the charging curve at `points` evenly spaced times over
/// `[0, span_tau · τ]`.
pub fn charge_curve(vin: f64, tau: f64, points: usize, span_tau: f64) -> Vec<ChargePoint> {
    let points = points.max(2);
    let end = span_tau * tau;
    let step = end / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let time = step * i as f64;
            ChargePoint {
                time,
                voltage: charge_voltage(vin, tau, time),
            }
        })
        .collect()
}

/// Which of the two complementary charging quantities a solve produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeSolution {
    /// Neither a target nor a time was given
    TimeConstantOnly,
    /// Time for the capacitor to reach the target voltage
    TimeToTarget { target_voltage: f64, time: f64 },
    /// Capacitor voltage after the elapsed time
    VoltageAtTime { time: f64, voltage: f64 },
}

/// Charging-mode inputs; `None` means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RcChargeInputs {
    pub supply_voltage: Option<f64>,
    pub resistance: Option<f64>,
    pub capacitance: Option<f64>,
    pub target_voltage: Option<f64>,
    pub elapsed_time: Option<f64>,
}

/// Result of a charging solve.
#[derive(Debug, Clone, PartialEq)]
pub struct RcChargeResult {
    pub time_constant: f64,
    pub solution: ChargeSolution,
    /// Sampled `(t, Vc)` pairs for plotting
    pub curve: Vec<ChargePoint>,
}

impl RcChargeInputs {
    /// Solve with the default configuration.
    pub fn solve(&self) -> Result<RcChargeResult> {
        self.solve_with(&CalcConfig::default())
    }

    /// Solve for time or voltage, whichever is resolvable.
    ///
    /// An elapsed time takes precedence over a target voltage.
    pub fn solve_with(&self, config: &CalcConfig) -> Result<RcChargeResult> {
        let (vin, r, c) = match (self.supply_voltage, self.resistance, self.capacitance) {
            (Some(vin), Some(r), Some(c)) => (vin, r, c),
            _ => {
                let known = count_known(&[self.supply_voltage, self.resistance, self.capacitance]);
                return Err(CalcError::insufficient("RC charging", 3, known));
            }
        };
        if r <= 0.0 || c <= 0.0 {
            return Err(CalcError::invalid_configuration(
                "resistance and capacitance must be positive",
            ));
        }

        let tau = r * c;
        let solution = match (self.elapsed_time, self.target_voltage) {
            (Some(t), _) => {
                if t < 0.0 {
                    return Err(CalcError::invalid_configuration(
                        "elapsed time must not be negative",
                    ));
                }
                ChargeSolution::VoltageAtTime {
                    time: t,
                    voltage: charge_voltage(vin, tau, t),
                }
            }
            (None, Some(target)) => ChargeSolution::TimeToTarget {
                target_voltage: target,
                time: time_to_reach(vin, tau, target)?,
            },
            (None, None) => ChargeSolution::TimeConstantOnly,
        };

        debug!(time_constant = tau, ?solution, "rc charging solved");
        Ok(RcChargeResult {
            time_constant: tau,
            solution,
            curve: charge_curve(vin, tau, config.curve_points, config.curve_span_tau),
        })
    }
}

/// The two complementary charging fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeField {
    TargetVoltage,
    ElapsedTime,
}

/// Charging form: a time solve fills the target voltage, a target solve
/// fills the elapsed time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RcChargeForm {
    inputs: RcChargeInputs,
    state: SolveState<ChargeField>,
}

impl RcChargeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inputs(&self) -> &RcChargeInputs {
        &self.inputs
    }

    pub fn state(&self) -> &SolveState<ChargeField> {
        &self.state
    }

    /// Apply an edit to the inputs, clearing the previous solve marks.
    ///
    /// The value written back by the previous solve is dropped first, so a
    /// solved time never outranks a target typed afterwards.
    pub fn edit(&mut self, change: impl FnOnce(&mut RcChargeInputs)) {
        clear_derived(&mut self.inputs, self.state.derived());
        change(&mut self.inputs);
        self.state.edit();
    }

    pub fn solve(&mut self, config: &CalcConfig) -> Result<RcChargeResult> {
        let mut inputs = self.inputs;
        clear_derived(&mut inputs, self.state.derived());

        let result = inputs.solve_with(config)?;
        self.state = match result.solution {
            ChargeSolution::VoltageAtTime { voltage, .. } => {
                self.inputs.target_voltage = Some(voltage);
                SolveState::solved([ChargeField::TargetVoltage])
            }
            ChargeSolution::TimeToTarget { time, .. } => {
                self.inputs.elapsed_time = Some(time);
                SolveState::solved([ChargeField::ElapsedTime])
            }
            ChargeSolution::TimeConstantOnly => SolveState::solved([]),
        };
        Ok(result)
    }
}

fn clear_derived(inputs: &mut RcChargeInputs, derived: &[ChargeField]) {
    for field in derived {
        match field {
            ChargeField::TargetVoltage => inputs.target_voltage = None,
            ChargeField::ElapsedTime => inputs.elapsed_time = None,
        }
    }
}
