//! WASM bindings for Ohmkit.
//!
//! Flat numeric functions for a browser form. An empty input field is passed
//! as `NaN` and treated as unknown; errors come back as the message string
//! the form should display.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { ohms_law, format_with_unit } from 'ohmkit';
//!
//! await init();
//!
//! try {
//!   const [v, i, r, p] = ohms_law(10, 2, NaN, NaN);
//!   resistance.value = format_with_unit(r, 'Ω');
//! } catch (message) {
//!   error.textContent = message;
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::error::CalcError;
use crate::solvers::{
    color_code, solve_network, BandCount, BatteryInputs, ChargeSolution, DividerInputs,
    LedInputs, Multiplier, NetworkMode, OhmsLawInputs, RcChargeInputs, RcFilterInputs,
    Resistor, ResistorId, Source, SourceKind,
};
use crate::units::{self, ScaledValue};

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn known(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

fn to_js(err: CalcError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Format a value with the best-fitting SI prefix, e.g. `4.7 kΩ`.
#[wasm_bindgen]
pub fn format_with_unit(value: f64, unit: &str) -> String {
    units::format_with_unit(value, unit)
}

/// Format a value in exponential notation, e.g. `1.59e-4`.
#[wasm_bindgen]
pub fn format_scientific(value: f64) -> String {
    units::format_scientific(value)
}

/// Parse a field such as `4.7k`; `undefined` when blank, throws when malformed.
#[wasm_bindgen]
pub fn parse_value(text: &str) -> Result<Option<f64>, JsValue> {
    units::parse_optional(text).map_err(to_js)
}

/// Solve a resistor network.
///
/// # Arguments
/// * `parallel` - `true` for parallel, `false` for series
/// * `source_is_current` - whether `source_value` is a current (A) or a voltage (V)
/// * `resistances` - resistor values in ohms
///
/// # Returns
/// `[R_total, V_total, I_total, P_total]` followed by
/// `[drop, current, power, share%]` for each resistor.
#[wasm_bindgen]
pub fn network(
    parallel: bool,
    source_is_current: bool,
    source_value: f64,
    resistances: &[f64],
) -> Vec<f64> {
    let mode = if parallel {
        NetworkMode::Parallel
    } else {
        NetworkMode::Series
    };
    let kind = if source_is_current {
        SourceKind::Current
    } else {
        SourceKind::Voltage
    };
    let resistors: Vec<Resistor> = resistances
        .iter()
        .zip(1..)
        .map(|(&ohms, n)| Resistor::new(ResistorId(n), ohms, Multiplier::Ohms))
        .collect();

    let result = solve_network(
        mode,
        Source {
            kind,
            value: source_value,
        },
        &resistors,
    );

    let mut out = vec![
        result.total_resistance,
        result.total_voltage,
        result.total_current,
        result.total_power,
    ];
    for r in &result.resistors {
        out.extend([r.voltage_drop, r.current_flow, r.power, r.share_percentage]);
    }
    out
}

/// Voltage divider; pass exactly one `NaN`. Returns `[Vin, Ra, Rb, Vout]`.
#[wasm_bindgen]
pub fn divider(vin: f64, ra: f64, rb: f64, vout: f64) -> Result<Vec<f64>, JsValue> {
    let result = DividerInputs {
        vin: known(vin),
        ra: known(ra),
        rb: known(rb),
        vout: known(vout),
    }
    .solve()
    .map_err(to_js)?;
    Ok(vec![result.vin, result.ra, result.rb, result.vout])
}

/// Ohm's law; pass exactly two `NaN`s. Returns `[V, I, R, P]`.
#[wasm_bindgen]
pub fn ohms_law(
    voltage: f64,
    current: f64,
    resistance: f64,
    power: f64,
) -> Result<Vec<f64>, JsValue> {
    let result = OhmsLawInputs {
        voltage: known(voltage),
        current: known(current),
        resistance: known(resistance),
        power: known(power),
    }
    .solve()
    .map_err(to_js)?;
    Ok(vec![result.voltage, result.current, result.resistance, result.power])
}

/// LED series resistor. Returns `[R, P_resistor, P_led]`.
#[wasm_bindgen]
pub fn led(
    supply_voltage: f64,
    forward_voltage: f64,
    current_ma: f64,
) -> Result<Vec<f64>, JsValue> {
    let result = LedInputs::new(supply_voltage, forward_voltage, current_ma)
        .solve()
        .map_err(to_js)?;
    Ok(vec![result.resistance, result.resistor_power, result.led_power])
}

/// RC filter; pass exactly one `NaN`. Returns `[R, C, fc, tau]`.
#[wasm_bindgen]
pub fn rc_filter(resistance: f64, capacitance: f64, frequency: f64) -> Result<Vec<f64>, JsValue> {
    let scaled = |v: f64| known(v).map(ScaledValue::from_base);
    let result = RcFilterInputs {
        resistance: scaled(resistance),
        capacitance: scaled(capacitance),
        frequency: scaled(frequency),
    }
    .solve()
    .map_err(to_js)?;
    Ok(vec![
        result.resistance,
        result.capacitance,
        result.cutoff_frequency,
        result.time_constant,
    ])
}

/// RC charging.
///
/// Returns `[tau, t, Vc]` followed by the sampled curve as `t, V` pairs.
/// `t` and `Vc` are `NaN` when neither a target nor a time was given.
#[wasm_bindgen]
pub fn rc_charge(
    supply_voltage: f64,
    resistance: f64,
    capacitance: f64,
    target_voltage: f64,
    elapsed_time: f64,
) -> Result<Vec<f64>, JsValue> {
    let result = RcChargeInputs {
        supply_voltage: known(supply_voltage),
        resistance: known(resistance),
        capacitance: known(capacitance),
        target_voltage: known(target_voltage),
        elapsed_time: known(elapsed_time),
    }
    .solve()
    .map_err(to_js)?;

    let (time, voltage) = match result.solution {
        ChargeSolution::TimeConstantOnly => (f64::NAN, f64::NAN),
        ChargeSolution::TimeToTarget {
            target_voltage,
            time,
        } => (time, target_voltage),
        ChargeSolution::VoltageAtTime { time, voltage } => (time, voltage),
    };

    let mut out = vec![result.time_constant, time, voltage];
    for point in &result.curve {
        out.extend([point.time, point.voltage]);
    }
    Ok(out)
}

/// Battery runtime. Returns `[total_hours, days, hours, minutes]`, or an
/// empty array when there is no estimate.
#[wasm_bindgen]
pub fn battery(capacity_mah: f64, current_ma: f64, efficiency: f64) -> Vec<f64> {
    let inputs = BatteryInputs {
        capacity_mah: known(capacity_mah),
        current_ma: known(current_ma),
        efficiency,
    };
    match inputs.solve() {
        Some(life) => vec![
            life.total_hours,
            life.days as f64,
            life.hours as f64,
            life.minutes as f64,
        ],
        None => Vec::new(),
    }
}

/// Decode colour bands given by name; blank names are missing bands.
/// Returns `[resistance, tolerance%]`.
#[wasm_bindgen]
pub fn decode_colors(bands: Vec<String>) -> Result<Vec<f64>, JsValue> {
    let colors = color_code::parse_bands(bands.as_slice()).map_err(to_js)?;
    let count = BandCount::try_from(colors.len()).map_err(to_js)?;
    let result = color_code::decode(count, &colors).map_err(to_js)?;
    Ok(vec![result.resistance, result.tolerance_percent])
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
