//! Solver configuration.

use std::ops::RangeInclusive;

use crate::units::NumberStyle;

/// Tolerance used when two voltages are compared for equality.
pub const DEFAULT_EQUALITY_TOLERANCE: f64 = 1e-6;

/// Decimal places kept when Ohm's-law results are written back.
pub const DEFAULT_DISPLAY_DECIMALS: usize = 4;

/// Number of samples in the RC charge curve.
pub const DEFAULT_CURVE_POINTS: usize = 31;

/// Span of the RC charge curve in time constants (5τ is ~99.3% charged).
pub const DEFAULT_CURVE_SPAN_TAU: f64 = 5.0;

/// Configuration shared by all solvers.
#[derive(Debug, Clone, PartialEq)]
pub struct CalcConfig {
    /// Absolute tolerance for "these two voltages are equal" checks.
    pub equality_tolerance: f64,
    /// Decimal places kept by the Ohm's-law solver.
    pub display_decimals: usize,
    /// Sample count of the RC charge curve (at least 2).
    pub curve_points: usize,
    /// Time span of the RC charge curve, in multiples of τ.
    pub curve_span_tau: f64,
    /// Allowed battery efficiency/derating factor.
    pub efficiency_range: RangeInclusive<f64>,
    /// Reject colour bands that do not fit their band role.
    pub strict_color_bands: bool,
    /// Separators used by the unit formatter.
    pub number_style: NumberStyle,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            equality_tolerance: DEFAULT_EQUALITY_TOLERANCE,
            display_decimals: DEFAULT_DISPLAY_DECIMALS,
            curve_points: DEFAULT_CURVE_POINTS,
            curve_span_tau: DEFAULT_CURVE_SPAN_TAU,
            efficiency_range: 0.5..=1.0,
            strict_color_bands: false,
            number_style: NumberStyle::default(),
        }
    }
}

impl CalcConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the voltage equality tolerance.
    pub fn with_equality_tolerance(mut self, tolerance: f64) -> Self {
        self.equality_tolerance = tolerance.abs();
        self
    }

    /// Set the number of decimals kept by the Ohm's-law solver.
    pub fn with_display_decimals(mut self, decimals: usize) -> Self {
        self.display_decimals = decimals;
        self
    }

    /// Set the RC charge curve resolution and span.
    ///
    /// At least two points are always produced so the curve has both ends.
    pub fn with_curve(mut self, points: usize, span_tau: f64) -> Self {
        self.curve_points = points.max(2);
        self.curve_span_tau = span_tau;
        self
    }

    /// Set the allowed battery efficiency range.
    ///
    /// Reversed bounds are swapped. A range with a NaN bound is ignored and
    /// the previous range kept.
    pub fn with_efficiency_range(mut self, range: RangeInclusive<f64>) -> Self {
        let (start, end) = range.into_inner();
        if start.is_nan() || end.is_nan() {
            return self;
        }
        self.efficiency_range = start.min(end)..=start.max(end);
        self
    }

    /// Reject incompatible colour bands instead of defaulting them.
    pub fn with_strict_color_bands(mut self, strict: bool) -> Self {
        self.strict_color_bands = strict;
        self
    }

    /// Set the number formatting style.
    pub fn with_number_style(mut self, style: NumberStyle) -> Self {
        self.number_style = style;
        self
    }

    /// Clamp an efficiency factor into the configured range.
    pub fn clamp_efficiency(&self, efficiency: f64) -> f64 {
        let (start, end) = (*self.efficiency_range.start(), *self.efficiency_range.end());
        efficiency.max(start.min(end)).min(start.max(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = CalcConfig::new()
            .with_curve(1, 3.0)
            .with_display_decimals(2)
            .with_strict_color_bands(true);

        assert_eq!(config.curve_points, 2);
        assert_eq!(config.curve_span_tau, 3.0);
        assert_eq!(config.display_decimals, 2);
        assert!(config.strict_color_bands);
        assert_eq!(config.equality_tolerance, DEFAULT_EQUALITY_TOLERANCE);
    }

    #[test]
    fn test_clamp_efficiency() {
        let config = CalcConfig::default();
        assert_eq!(config.clamp_efficiency(0.2), 0.5);
        assert_eq!(config.clamp_efficiency(1.4), 1.0);
        assert_eq!(config.clamp_efficiency(0.85), 0.85);
    }

    #[test]
    fn test_efficiency_range_is_normalised() {
        let config = CalcConfig::new().with_efficiency_range(1.0..=0.5);
        assert_eq!(config.efficiency_range, 0.5..=1.0);
        assert_eq!(config.clamp_efficiency(0.8), 0.8);
        assert_eq!(config.clamp_efficiency(0.1), 0.5);

        let config = CalcConfig::new().with_efficiency_range(f64::NAN..=0.9);
        assert_eq!(config.efficiency_range, 0.5..=1.0);
        assert_eq!(config.clamp_efficiency(1.2), 1.0);

        // The field is public, so clamping tolerates a reversed range too
        let mut config = CalcConfig::new();
        config.efficiency_range = 0.9..=0.6;
        assert_eq!(config.clamp_efficiency(0.95), 0.9);
        assert_eq!(config.clamp_efficiency(0.3), 0.6);
    }
}
