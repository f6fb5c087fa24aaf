//! The calculators.
//!
//! Every solver is a pure function from a sparse set of known quantities to
//! a complete set, or a [`CalcError`](crate::error::CalcError) explaining why
//! the inputs cannot be solved:
//!
//! - [`network`] - series and parallel resistor networks
//! - [`divider`] - two-resistor voltage divider
//! - [`ohms_law`] - V, I, R and P from any two
//! - [`led`] - LED series resistor
//! - [`rc`] - RC filter cutoff and capacitor charging
//! - [`battery`] - battery runtime
//! - [`color_code`] - resistor colour bands
//!
//! Input records use `Option<f64>` per field: `None` is "unknown", which is
//! distinct from a user-entered zero.

pub mod battery;
pub mod color_code;
pub mod divider;
pub mod led;
pub mod network;
pub mod ohms_law;
pub mod rc;

pub use battery::{BatteryInputs, BatteryLife};
pub use color_code::{BandColor, BandCount, BandRole, ColorCodeResult};
pub use divider::{DividerField, DividerForm, DividerInputs, DividerResult};
pub use led::{LedInputs, LedResult};
pub use network::{
    solve_network, CalculatedResistor, Multiplier, NetworkMode, NetworkResult, NetworkSolver,
    Resistor, ResistorId, ResistorList, Source, SourceKind,
};
pub use ohms_law::{OhmsField, OhmsLawForm, OhmsLawInputs, OhmsLawResult};
pub use rc::{
    ChargeField, ChargePoint, ChargeSolution, RcChargeForm, RcChargeInputs, RcChargeResult, RcField,
    RcFilterForm, RcFilterInputs, RcFilterResult,
};

/// Number of fields that hold a value.
pub(crate) fn count_known(values: &[Option<f64>]) -> usize {
    values.iter().filter(|v| v.is_some()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalcConfig;
    use crate::units::{format_with_unit, parse_value, ScaledValue};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn resistors(values: &[&str]) -> ResistorList {
        let ohms: Vec<f64> = values.iter().filter_map(|v| parse_value(v)).collect();
        ResistorList::from_ohms(&ohms).unwrap()
    }

    #[test]
    fn test_series_drops_sum_to_total_voltage() {
        for values in [&["100"][..], &["100", "220", "4.7k"], &["1M", "0", "33"]] {
            let list = resistors(values);
            let result = solve_network(NetworkMode::Series, Source::voltage(12.0), list.as_slice());

            let sum: f64 = result.resistors.iter().map(|r| r.voltage_drop).sum();
            assert_relative_eq!(sum, result.total_voltage, max_relative = 1e-9);
            for r in &result.resistors {
                assert_eq!(r.current_flow, result.total_current);
            }
        }
    }

    #[test]
    fn test_parallel_currents_sum_to_total_current() {
        for values in [&["100"][..], &["100", "220", "4.7k"], &["10k", "10k", "10k", "10k"]] {
            let list = resistors(values);
            let result =
                solve_network(NetworkMode::Parallel, Source::current(0.5), list.as_slice());

            let sum: f64 = result.resistors.iter().map(|r| r.current_flow).sum();
            assert_relative_eq!(sum, result.total_current, max_relative = 1e-9);
            for r in &result.resistors {
                assert_eq!(r.voltage_drop, result.total_voltage);
            }
        }
    }

    #[test]
    fn test_ohms_law_round_trip() {
        let forward = OhmsLawInputs {
            voltage: Some(7.3),
            current: Some(0.37),
            ..Default::default()
        }
        .solve()
        .unwrap();

        let back = OhmsLawInputs {
            resistance: Some(forward.resistance),
            power: Some(forward.power),
            ..Default::default()
        }
        .solve()
        .unwrap();

        assert_abs_diff_eq!(back.voltage, 7.3, epsilon = 1e-3);
        assert_abs_diff_eq!(back.current, 0.37, epsilon = 1e-3);
    }

    #[test]
    fn test_reference_values() {
        let divider = DividerInputs {
            vin: Some(9.0),
            ra: Some(1000.0),
            rb: Some(2000.0),
            vout: None,
        }
        .solve()
        .unwrap();
        assert_relative_eq!(divider.vout, 6.0, max_relative = 1e-12);

        let ohms = OhmsLawInputs {
            voltage: Some(10.0),
            current: Some(2.0),
            ..Default::default()
        }
        .solve()
        .unwrap();
        assert_eq!(ohms.resistance, 5.0);
        assert_eq!(ohms.power, 20.0);

        let led = LedInputs::new(5.0, 2.0, 20.0).solve().unwrap();
        assert_relative_eq!(led.resistance, 150.0, max_relative = 1e-12);
        assert_relative_eq!(led.resistor_power, 0.06, max_relative = 1e-12);
        assert_relative_eq!(led.led_power, 0.04, max_relative = 1e-12);

        let rc = RcFilterInputs {
            resistance: Some(ScaledValue::from_base(1000.0)),
            capacitance: Some(ScaledValue::from_base(1e-6)),
            frequency: None,
        }
        .solve()
        .unwrap();
        assert_relative_eq!(rc.time_constant, 0.001, max_relative = 1e-12);
        assert_abs_diff_eq!(rc.cutoff_frequency, 159.15, epsilon = 0.01);

        let charge = RcChargeInputs {
            supply_voltage: Some(5.0),
            resistance: parse_value("10k"),
            capacitance: parse_value("100u"),
            target_voltage: Some(3.16),
            elapsed_time: None,
        }
        .solve()
        .unwrap();
        assert_relative_eq!(charge.time_constant, 1.0, max_relative = 1e-9);
        match charge.solution {
            ChargeSolution::TimeToTarget { time, .. } => {
                assert_abs_diff_eq!(time, 1.0, epsilon = 1e-3)
            }
            other => panic!("unexpected solution {:?}", other),
        }

        use super::color_code::parse_bands;
        let bands = parse_bands(&["brown", "black", "red", "gold"]).unwrap();
        let color = color_code::decode(BandCount::Four, &bands).unwrap();
        assert_relative_eq!(color.resistance, 1000.0, max_relative = 1e-12);
        assert_eq!(color.tolerance_percent, 5.0);

        let life = BatteryInputs::new(2000.0, 100.0, 0.85).solve().unwrap();
        assert_eq!(life.hours_display(), "17.0");
        assert_eq!(life.to_string(), "17 hours 0 minutes");
    }

    #[test]
    fn test_solvers_are_idempotent() {
        let config = CalcConfig::default();

        // Divider: a form re-solve treats its own derived field as unknown
        let mut form = DividerForm::new();
        form.set(DividerField::Vin, Some(12.0));
        form.set(DividerField::Ra, Some(4700.0));
        form.set(DividerField::Rb, Some(3300.0));
        let first = form.solve(&config).unwrap();
        let second = form.solve(&config).unwrap();
        assert_eq!(first, second);

        // Feeding the derived Vout back while dropping Rb reproduces Rb
        let rb = DividerInputs {
            vin: Some(first.vin),
            ra: Some(first.ra),
            rb: None,
            vout: Some(first.vout),
        }
        .solve()
        .unwrap();
        assert_relative_eq!(rb.rb, 3300.0, max_relative = 1e-9);

        // RC filter: derived cutoff reproduces the capacitance
        let rc = RcFilterInputs {
            resistance: Some(ScaledValue::from_base(4700.0)),
            capacitance: Some(ScaledValue::from_base(22e-9)),
            frequency: None,
        }
        .solve()
        .unwrap();
        let back = RcFilterInputs {
            resistance: Some(ScaledValue::from_base(rc.resistance)),
            capacitance: None,
            frequency: Some(rc.derived_scaled),
        }
        .solve()
        .unwrap();
        assert_relative_eq!(back.capacitance, 22e-9, max_relative = 1e-9);
    }

    #[test]
    fn test_unit_formatting() {
        assert_eq!(format_with_unit(4700.0, "Ω"), "4.7 kΩ");
        assert_eq!(format_with_unit(0.0, "V"), "0 V");
        assert_eq!(format_with_unit(159.154_943, "Hz"), "159.155 Hz");
    }
}
