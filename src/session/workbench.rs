//! All calculators behind a single mode switch.

use tracing::debug;

use crate::config::CalcConfig;
use crate::error::{CalcError, Result};
use crate::solvers::battery::{BatteryInputs, BatteryLife};
use crate::solvers::color_code::{self, BandColor, BandCount, ColorCodeResult};
use crate::solvers::divider::{DividerForm, DividerResult};
use crate::solvers::led::{LedInputs, LedResult};
use crate::solvers::network::{
    NetworkMode, NetworkResult, NetworkSolver, ResistorList, Source, SourceKind,
};
use crate::solvers::ohms_law::{OhmsLawForm, OhmsLawResult};
use crate::solvers::rc::{RcChargeForm, RcChargeResult, RcFilterForm, RcFilterResult};

use super::mode::{on_mode_change, CalculationMode, ModeChangeEffects};

/// Resistor network inputs, shared by the series and parallel modes.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkForm {
    pub resistors: ResistorList,
    pub source_value: f64,
    pub source_kind: SourceKind,
}

impl Default for NetworkForm {
    fn default() -> Self {
        Self {
            resistors: ResistorList::new(),
            source_value: 12.0,
            source_kind: SourceKind::Voltage,
        }
    }
}

impl NetworkForm {
    pub fn source(&self) -> Source {
        Source {
            kind: self.source_kind,
            value: self.source_value,
        }
    }
}

/// Colour band selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCodeForm {
    count: BandCount,
    bands: Vec<Option<BandColor>>,
}

impl Default for ColorCodeForm {
    fn default() -> Self {
        use BandColor::*;
        Self {
            count: BandCount::Four,
            bands: vec![Some(Brown), Some(Black), Some(Red), Some(Gold)],
        }
    }
}

impl ColorCodeForm {
    pub fn count(&self) -> BandCount {
        self.count
    }

    pub fn bands(&self) -> &[Option<BandColor>] {
        &self.bands
    }

    /// Change the band count, keeping the colours of the leading bands.
    pub fn set_count(&mut self, count: BandCount) {
        self.count = count;
        self.bands.resize(count.len(), None);
    }

    /// Select the colour of one band.
    pub fn set_band(&mut self, position: usize, color: Option<BandColor>) -> Result<()> {
        let slot = self.bands.get_mut(position).ok_or_else(|| {
            CalcError::invalid_configuration(format!("no band at position {}", position + 1))
        })?;
        *slot = color;
        Ok(())
    }
}

/// RC calculator sub-mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RcSubMode {
    #[default]
    Filter,
    Charging,
}

/// Result of the active calculator.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Network(NetworkResult),
    Divider(DividerResult),
    OhmsLaw(OhmsLawResult),
    Led(LedResult),
    RcFilter(RcFilterResult),
    RcCharge(RcChargeResult),
    /// `None` when there is nothing to show yet
    Battery(Option<BatteryLife>),
    ColorCode(ColorCodeResult),
}

/// Every calculator's inputs plus the active mode and its shown result.
#[derive(Debug)]
pub struct Workbench {
    config: CalcConfig,
    mode: CalculationMode,
    pub network: NetworkForm,
    network_solver: NetworkSolver,
    pub divider: DividerForm,
    pub ohms_law: OhmsLawForm,
    pub led: LedInputs,
    pub rc_sub_mode: RcSubMode,
    pub rc_filter: RcFilterForm,
    pub rc_charge: RcChargeForm,
    pub battery: BatteryInputs,
    pub color_code: ColorCodeForm,
    shown: Option<std::result::Result<Outcome, CalcError>>,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(CalcConfig::default())
    }
}

impl Workbench {
    /// Create a workbench in series mode with default inputs.
    pub fn new(config: CalcConfig) -> Self {
        Self {
            config,
            mode: CalculationMode::default(),
            network: NetworkForm::default(),
            network_solver: NetworkSolver::new(),
            divider: DividerForm::new(),
            ohms_law: OhmsLawForm::new(),
            led: LedInputs::new(5.0, 2.0, 20.0),
            rc_sub_mode: RcSubMode::default(),
            rc_filter: RcFilterForm::new(),
            rc_charge: RcChargeForm::new(),
            battery: BatteryInputs::new(2000.0, 100.0, 0.85),
            color_code: ColorCodeForm::default(),
            shown: None,
        }
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    pub fn mode(&self) -> CalculationMode {
        self.mode
    }

    /// Switch the active calculator.
    pub fn switch_mode(&mut self, mode: CalculationMode) -> ModeChangeEffects {
        let effects = on_mode_change(self.mode, mode);
        if let Some(kind) = effects.reset_source_kind {
            self.network.source_kind = kind;
        }
        if effects.discard_results {
            self.shown = None;
        }
        debug!(from = %self.mode, to = %mode, "mode switched");
        self.mode = mode;
        effects
    }

    /// Run the active calculator and keep its result (or error) for display.
    ///
    /// A failed solve leaves every input untouched.
    pub fn calculate(&mut self) -> Result<Outcome> {
        let outcome = self.solve_active();
        if let Err(err) = &outcome {
            debug!(mode = %self.mode, error = %err, "calculation rejected");
        }
        self.shown = Some(outcome.clone());
        outcome
    }

    fn solve_active(&mut self) -> Result<Outcome> {
        match self.mode {
            CalculationMode::Series => Ok(self.solve_network(NetworkMode::Series)),
            CalculationMode::Parallel => Ok(self.solve_network(NetworkMode::Parallel)),
            CalculationMode::VoltageDivider => {
                self.divider.solve(&self.config).map(Outcome::Divider)
            }
            CalculationMode::OhmsLaw => self.ohms_law.solve(&self.config).map(Outcome::OhmsLaw),
            CalculationMode::Led => self.led.solve().map(Outcome::Led),
            CalculationMode::RcTime => match self.rc_sub_mode {
                RcSubMode::Filter => self.rc_filter.solve().map(Outcome::RcFilter),
                RcSubMode::Charging => self.rc_charge.solve(&self.config).map(Outcome::RcCharge),
            },
            CalculationMode::BatteryLife => {
                Ok(Outcome::Battery(self.battery.solve_with(&self.config)))
            }
            CalculationMode::ColorCode => color_code::decode_with(
                self.color_code.count(),
                self.color_code.bands(),
                &self.config,
            )
            .map(Outcome::ColorCode),
        }
    }

    fn solve_network(&mut self, mode: NetworkMode) -> Outcome {
        let result = self.network_solver.solve(
            mode,
            self.network.source(),
            self.network.resistors.as_slice(),
        );
        Outcome::Network(result.clone())
    }

    /// The result currently on display, if any.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.shown.as_ref().and_then(|r| r.as_ref().ok())
    }

    /// Error message tied to the active mode, if the last calculation failed.
    pub fn message(&self) -> Option<String> {
        match &self.shown {
            Some(Err(err)) => Some(err.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solvers::divider::DividerField;
    use crate::solvers::ohms_law::OhmsField;
    use approx::assert_relative_eq;

    #[test]
    fn test_series_then_parallel() {
        let mut bench = Workbench::default();
        bench.network.resistors = ResistorList::from_ohms(&[100.0, 100.0]).unwrap();
        bench.network.source_value = 10.0;

        match bench.calculate().unwrap() {
            Outcome::Network(result) => {
                assert_relative_eq!(result.total_current, 0.05, max_relative = 1e-12)
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        let effects = bench.switch_mode(CalculationMode::Parallel);
        assert_eq!(effects.reset_source_kind, Some(SourceKind::Current));
        assert_eq!(bench.network.source_kind, SourceKind::Current);
        assert!(bench.outcome().is_none());
        // The network inputs survive the switch
        assert_eq!(bench.network.resistors.len(), 2);
        assert_eq!(bench.network.source_value, 10.0);

        match bench.calculate().unwrap() {
            Outcome::Network(result) => {
                assert_relative_eq!(result.total_voltage, 500.0, max_relative = 1e-12)
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_error_message_and_inputs_kept() {
        let mut bench = Workbench::default();
        bench.switch_mode(CalculationMode::OhmsLaw);
        bench.ohms_law.set(OhmsField::Voltage, Some(5.0));

        assert!(bench.calculate().is_err());
        assert_eq!(
            bench.message().as_deref(),
            Some("Ohm's law: need exactly 2 known values, got 1")
        );
        assert_eq!(bench.ohms_law.inputs().voltage, Some(5.0));

        bench.switch_mode(CalculationMode::VoltageDivider);
        assert!(bench.message().is_none());

        bench.divider.set(DividerField::Vin, Some(9.0));
        bench.divider.set(DividerField::Ra, Some(1000.0));
        bench.divider.set(DividerField::Rb, Some(2000.0));
        assert!(matches!(bench.calculate(), Ok(Outcome::Divider(_))));

        // Returning to Ohm's law finds its inputs where they were left
        bench.switch_mode(CalculationMode::OhmsLaw);
        assert_eq!(bench.ohms_law.inputs().voltage, Some(5.0));
    }

    #[test]
    fn test_other_modes() {
        let mut bench = Workbench::default();

        bench.switch_mode(CalculationMode::Led);
        assert!(matches!(bench.calculate(), Ok(Outcome::Led(_))));

        bench.switch_mode(CalculationMode::BatteryLife);
        match bench.calculate().unwrap() {
            Outcome::Battery(Some(life)) => assert_eq!(life.hours, 17),
            other => panic!("unexpected outcome {:?}", other),
        }

        bench.switch_mode(CalculationMode::ColorCode);
        match bench.calculate().unwrap() {
            Outcome::ColorCode(result) => {
                assert_relative_eq!(result.resistance, 1000.0, max_relative = 1e-12)
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        bench.color_code.set_count(BandCount::Five);
        assert_eq!(bench.color_code.bands().len(), 5);
        assert!(bench.color_code.set_band(5, None).is_err());

        bench.switch_mode(CalculationMode::RcTime);
        bench.rc_sub_mode = RcSubMode::Charging;
        bench.rc_charge.edit(|inputs| {
            inputs.supply_voltage = Some(5.0);
            inputs.resistance = Some(1000.0);
            inputs.capacitance = Some(1e-3);
        });
        match bench.calculate().unwrap() {
            Outcome::RcCharge(result) => assert_eq!(result.curve.len(), 31),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
