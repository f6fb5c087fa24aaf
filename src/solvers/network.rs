//! Series and parallel resistor networks.
//!
//! Given a source (a voltage or a current) and a list of resistors, compute
//! the total resistance and the voltage, current, power and share of every
//! element.
//!
//! Series:
//! ```text
//!   R_total = Σ Ri          I_i = I_total          V_i = I_total · Ri
//! ```
//! Parallel:
//! ```text
//!   G = Σ 1/Ri (Ri > 0)     R_total = 1/G          V_i = V_total     I_i = V_total / Ri
//! ```
//!
//! This solver has no error path: a zero total resistance, zero conductance
//! or zero source collapses the affected quantities to 0 instead of
//! producing infinities or NaN.

use std::fmt;

use tracing::{debug, trace};

use crate::error::{CalcError, Result};

/// Value given to a freshly added resistor row.
pub const DEFAULT_RESISTOR_VALUE: f64 = 100.0;

/// Network topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkMode {
    Series,
    Parallel,
}

impl NetworkMode {
    /// The source kind a user most likely drives this topology with.
    pub fn default_source_kind(self) -> SourceKind {
        match self {
            NetworkMode::Series => SourceKind::Voltage,
            NetworkMode::Parallel => SourceKind::Current,
        }
    }
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkMode::Series => write!(f, "series"),
            NetworkMode::Parallel => write!(f, "parallel"),
        }
    }
}

/// What the source value of a network represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Voltage,
    Current,
}

/// A network source: a voltage in volts or a current in amperes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    pub kind: SourceKind,
    pub value: f64,
}

impl Source {
    /// A voltage source.
    pub fn voltage(volts: f64) -> Self {
        Self {
            kind: SourceKind::Voltage,
            value: volts,
        }
    }

    /// A current source.
    pub fn current(amps: f64) -> Self {
        Self {
            kind: SourceKind::Current,
            value: amps,
        }
    }
}

/// Unit multiplier of a resistor row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Multiplier {
    #[default]
    Ohms,
    Kilo,
    Mega,
}

impl Multiplier {
    pub fn factor(self) -> f64 {
        match self {
            Multiplier::Ohms => 1.0,
            Multiplier::Kilo => 1e3,
            Multiplier::Mega => 1e6,
        }
    }
}

/// Identifier of a resistor row. Only meaningful for list editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResistorId(pub u32);

impl fmt::Display for ResistorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// A resistor row: `value × multiplier` ohms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    pub id: ResistorId,
    pub value: f64,
    pub multiplier: Multiplier,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(id: ResistorId, value: f64, multiplier: Multiplier) -> Self {
        Self {
            id,
            value,
            multiplier,
        }
    }

    /// Actual resistance in ohms.
    pub fn resistance(&self) -> f64 {
        self.value * self.multiplier.factor()
    }
}

/// A resistor together with its derived electrical quantities.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatedResistor {
    pub resistor: Resistor,
    pub actual_resistance: f64,
    pub voltage_drop: f64,
    pub current_flow: f64,
    pub power: f64,
    /// Voltage share (series) or current share (parallel), in percent.
    pub share_percentage: f64,
}

/// Result of a network solve.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkResult {
    pub mode: NetworkMode,
    pub total_resistance: f64,
    pub total_voltage: f64,
    pub total_current: f64,
    pub total_power: f64,
    pub resistors: Vec<CalculatedResistor>,
}

/// A resistor list that always holds at least one resistor.
#[derive(Debug, Clone, PartialEq)]
pub struct ResistorList {
    items: Vec<Resistor>,
    next_id: u32,
}

impl Default for ResistorList {
    fn default() -> Self {
        Self::new()
    }
}

impl ResistorList {
    /// Create a list holding one default resistor.
    pub fn new() -> Self {
        let mut list = Self {
            items: Vec::new(),
            next_id: 1,
        };
        list.add();
        list
    }

    /// Build a list from plain ohm values.
    pub fn from_ohms(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(CalcError::LastResistor);
        }
        let mut list = Self {
            items: Vec::with_capacity(values.len()),
            next_id: 1,
        };
        for &value in values {
            check_value(value)?;
            let id = list.allocate_id();
            list.items.push(Resistor::new(id, value, Multiplier::Ohms));
        }
        Ok(list)
    }

    fn allocate_id(&mut self) -> ResistorId {
        let id = ResistorId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a resistor with the default value (100 Ω).
    pub fn add(&mut self) -> ResistorId {
        let id = self.allocate_id();
        self.items
            .push(Resistor::new(id, DEFAULT_RESISTOR_VALUE, Multiplier::Ohms));
        id
    }

    /// Remove a resistor. The last remaining resistor cannot be removed.
    pub fn remove(&mut self, id: ResistorId) -> Result<Resistor> {
        let index = self.index_of(id)?;
        if self.items.len() == 1 {
            return Err(CalcError::LastResistor);
        }
        Ok(self.items.remove(index))
    }

    /// Change the value of a resistor.
    pub fn set_value(&mut self, id: ResistorId, value: f64) -> Result<()> {
        check_value(value)?;
        let index = self.index_of(id)?;
        self.items[index].value = value;
        Ok(())
    }

    /// Change the unit multiplier of a resistor.
    pub fn set_multiplier(&mut self, id: ResistorId, multiplier: Multiplier) -> Result<()> {
        let index = self.index_of(id)?;
        self.items[index].multiplier = multiplier;
        Ok(())
    }

    /// Look up a resistor.
    pub fn get(&self, id: ResistorId) -> Option<&Resistor> {
        self.items.iter().find(|r| r.id == id)
    }

    pub fn as_slice(&self) -> &[Resistor] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn index_of(&self, id: ResistorId) -> Result<usize> {
        self.items
            .iter()
            .position(|r| r.id == id)
            .ok_or(CalcError::ResistorNotFound { id: id.0 })
    }
}

fn check_value(value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_configuration(
            "resistor values must be non-negative",
        ));
    }
    Ok(())
}

/// `num / den`, or 0 when the denominator is 0.
fn ratio_or_zero(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// Solve a series or parallel network.
pub fn solve_network(mode: NetworkMode, source: Source, resistors: &[Resistor]) -> NetworkResult {
    let result = match mode {
        NetworkMode::Series => solve_series(source, resistors),
        NetworkMode::Parallel => solve_parallel(source, resistors),
    };
    debug!(
        %mode,
        resistors = resistors.len(),
        total_resistance = result.total_resistance,
        total_voltage = result.total_voltage,
        total_current = result.total_current,
        "network solved"
    );
    result
}

fn solve_series(source: Source, resistors: &[Resistor]) -> NetworkResult {
    let total_resistance: f64 = resistors.iter().map(Resistor::resistance).sum();

    let (total_voltage, total_current) = match source.kind {
        SourceKind::Voltage => (source.value, ratio_or_zero(source.value, total_resistance)),
        SourceKind::Current => (source.value * total_resistance, source.value),
    };

    let calculated = resistors
        .iter()
        .map(|r| {
            let resistance = r.resistance();
            let drop = total_current * resistance;
            CalculatedResistor {
                resistor: *r,
                actual_resistance: resistance,
                voltage_drop: drop,
                current_flow: total_current,
                power: total_current * total_current * resistance,
                share_percentage: ratio_or_zero(drop, total_voltage) * 100.0,
            }
        })
        .collect();

    NetworkResult {
        mode: NetworkMode::Series,
        total_resistance,
        total_voltage,
        total_current,
        total_power: total_voltage * total_current,
        resistors: calculated,
    }
}

fn solve_parallel(source: Source, resistors: &[Resistor]) -> NetworkResult {
    // Zero-ohm rows are left out of the conductance sum rather than treated as a short
    let conductance: f64 = resistors
        .iter()
        .map(Resistor::resistance)
        .filter(|&r| r > 0.0)
        .map(|r| 1.0 / r)
        .sum();
    let total_resistance = ratio_or_zero(1.0, conductance);

    let (total_voltage, total_current) = match source.kind {
        SourceKind::Voltage => (source.value, source.value * conductance),
        SourceKind::Current => (source.value * total_resistance, source.value),
    };

    let calculated = resistors
        .iter()
        .map(|r| {
            let resistance = r.resistance();
            let current = ratio_or_zero(total_voltage, resistance);
            CalculatedResistor {
                resistor: *r,
                actual_resistance: resistance,
                voltage_drop: total_voltage,
                current_flow: current,
                power: total_voltage * current,
                share_percentage: ratio_or_zero(current, total_current) * 100.0,
            }
        })
        .collect();

    NetworkResult {
        mode: NetworkMode::Parallel,
        total_resistance,
        total_voltage,
        total_current,
        total_power: total_voltage * total_current,
        resistors: calculated,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NetworkKey {
    mode: NetworkMode,
    source: Source,
    resistors: Vec<Resistor>,
}

/// Network solver that remembers its last result.
///
/// Re-solving with an unchanged input tuple returns the cached table.
#[derive(Debug, Default)]
pub struct NetworkSolver {
    cache: Option<(NetworkKey, NetworkResult)>,
}

impl NetworkSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve, reusing the previous result when the inputs are unchanged.
    pub fn solve(
        &mut self,
        mode: NetworkMode,
        source: Source,
        resistors: &[Resistor],
    ) -> &NetworkResult {
        let hit = matches!(
            &self.cache,
            Some((key, _)) if key.mode == mode && key.source == source && key.resistors == resistors
        );

        if hit {
            trace!(%mode, "network cache hit");
        } else {
            trace!(%mode, "network cache miss");
            self.cache = None;
        }

        let (_, result) = self.cache.get_or_insert_with(|| {
            let key = NetworkKey {
                mode,
                source,
                resistors: resistors.to_vec(),
            };
            (key, solve_network(mode, source, resistors))
        });
        result
    }

    /// Drop the cached result.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn list(values: &[f64]) -> ResistorList {
        ResistorList::from_ohms(values).unwrap()
    }

    #[test]
    fn test_series_voltage_source() {
        let resistors = list(&[100.0, 200.0, 700.0]);
        let result =
            solve_network(NetworkMode::Series, Source::voltage(10.0), resistors.as_slice());

        assert_relative_eq!(result.total_resistance, 1000.0, max_relative = 1e-12);
        assert_relative_eq!(result.total_current, 0.01, max_relative = 1e-12);
        assert_relative_eq!(result.total_power, 0.1, max_relative = 1e-12);

        let drops: Vec<f64> = result.resistors.iter().map(|r| r.voltage_drop).collect();
        assert_relative_eq!(drops[0], 1.0, max_relative = 1e-12);
        assert_relative_eq!(drops[1], 2.0, max_relative = 1e-12);
        assert_relative_eq!(drops[2], 7.0, max_relative = 1e-12);
        assert_relative_eq!(result.resistors[2].share_percentage, 70.0, max_relative = 1e-12);
        assert_relative_eq!(result.resistors[1].power, 0.01 * 0.01 * 200.0, max_relative = 1e-12);
        assert!(result.resistors.iter().all(|r| r.current_flow == 0.01));
    }

    #[test]
    fn test_series_current_source() {
        let resistors = list(&[1000.0, 1000.0]);
        let result =
            solve_network(NetworkMode::Series, Source::current(0.002), resistors.as_slice());

        assert_relative_eq!(result.total_voltage, 4.0, max_relative = 1e-12);
        assert_relative_eq!(result.resistors[0].share_percentage, 50.0, max_relative = 1e-12);
    }

    #[test]
    fn test_series_zero_resistance_collapses() {
        let resistors = list(&[0.0]);
        let result = solve_network(NetworkMode::Series, Source::voltage(5.0), resistors.as_slice());

        assert_eq!(result.total_current, 0.0);
        assert_eq!(result.total_power, 0.0);
        assert_eq!(result.resistors[0].share_percentage, 0.0);
    }

    #[test]
    fn test_parallel_current_source() {
        let resistors = list(&[100.0, 100.0]);
        let result =
            solve_network(NetworkMode::Parallel, Source::current(0.1), resistors.as_slice());

        assert_relative_eq!(result.total_resistance, 50.0, max_relative = 1e-12);
        assert_relative_eq!(result.total_voltage, 5.0, max_relative = 1e-12);
        for r in &result.resistors {
            assert_relative_eq!(r.voltage_drop, 5.0, max_relative = 1e-12);
            assert_relative_eq!(r.current_flow, 0.05, max_relative = 1e-12);
            assert_relative_eq!(r.power, 0.25, max_relative = 1e-12);
            assert_relative_eq!(r.share_percentage, 50.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_parallel_voltage_source_skips_zero_ohm() {
        let resistors = list(&[0.0, 1000.0]);
        let result =
            solve_network(NetworkMode::Parallel, Source::voltage(10.0), resistors.as_slice());

        assert_relative_eq!(result.total_resistance, 1000.0, max_relative = 1e-12);
        assert_relative_eq!(result.total_current, 0.01, max_relative = 1e-12);
        assert_eq!(result.resistors[0].current_flow, 0.0);
        assert_abs_diff_eq!(result.resistors[1].share_percentage, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_parallel_all_zero() {
        let resistors = list(&[0.0, 0.0]);
        let result =
            solve_network(NetworkMode::Parallel, Source::current(1.0), resistors.as_slice());

        assert_eq!(result.total_resistance, 0.0);
        assert_eq!(result.total_voltage, 0.0);
        assert!(result.resistors.iter().all(|r| r.current_flow == 0.0));
    }

    #[test]
    fn test_multiplier() {
        let mut resistors = ResistorList::new();
        let id = resistors.as_slice()[0].id;
        resistors.set_value(id, 4.7).unwrap();
        resistors.set_multiplier(id, Multiplier::Kilo).unwrap();
        assert_relative_eq!(resistors.as_slice()[0].resistance(), 4700.0, max_relative = 1e-12);
    }

    #[test]
    fn test_resistor_list_editing() {
        let mut resistors = ResistorList::new();
        assert_eq!(resistors.len(), 1);
        assert_eq!(resistors.as_slice()[0].value, DEFAULT_RESISTOR_VALUE);
        assert_eq!(resistors.as_slice()[0].multiplier, Multiplier::Ohms);

        let first = resistors.as_slice()[0].id;
        let second = resistors.add();
        assert_ne!(first, second);
        assert_eq!(resistors.len(), 2);

        resistors.remove(first).unwrap();
        assert_eq!(resistors.remove(second), Err(CalcError::LastResistor));
        assert_eq!(
            resistors.remove(first),
            Err(CalcError::ResistorNotFound { id: first.0 })
        );
        assert!(resistors.set_value(second, -1.0).is_err());

        // Ids are never reused
        let third = resistors.add();
        assert!(third > second);
    }

    #[test]
    fn test_from_ohms_rejects_empty() {
        assert_eq!(ResistorList::from_ohms(&[]), Err(CalcError::LastResistor));
    }

    #[test]
    fn test_solver_memoizes() {
        let resistors = list(&[100.0, 300.0]);
        let mut solver = NetworkSolver::new();

        let first = solver
            .solve(NetworkMode::Series, Source::voltage(4.0), resistors.as_slice())
            .clone();
        let again = solver.solve(NetworkMode::Series, Source::voltage(4.0), resistors.as_slice());
        assert_eq!(&first, again);

        let changed =
            solver.solve(NetworkMode::Parallel, Source::voltage(4.0), resistors.as_slice());
        assert_eq!(changed.mode, NetworkMode::Parallel);
        assert_relative_eq!(changed.total_resistance, 75.0, max_relative = 1e-12);
    }
}
