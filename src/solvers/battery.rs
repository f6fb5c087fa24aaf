//! Battery runtime estimation.

use std::fmt;

use tracing::debug;

use crate::config::CalcConfig;

/// Battery and load parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryInputs {
    /// Nominal capacity (mAh); `None` when the field is blank
    pub capacity_mah: Option<f64>,
    /// Average load current (mA); `None` when the field is blank
    pub current_ma: Option<f64>,
    /// Derating factor applied to the nominal capacity
    pub efficiency: f64,
}

/// Estimated runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryLife {
    /// Runtime as decimal hours
    pub total_hours: f64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl BatteryLife {
    /// Split decimal hours into whole days, hours and minutes.
    pub fn from_hours(total_hours: f64) -> Self {
        let total_minutes = (total_hours * 60.0).round() as u64;
        Self {
            total_hours,
            days: total_minutes / (24 * 60),
            hours: (total_minutes % (24 * 60)) / 60,
            minutes: total_minutes % 60,
        }
    }

    /// Decimal hours with one decimal place, e.g. `17.0`.
    pub fn hours_display(&self) -> String {
        format!("{:.1}", self.total_hours)
    }
}

impl fmt::Display for BatteryLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{} days ", self.days)?;
        }
        write!(f, "{} hours {} minutes", self.hours, self.minutes)
    }
}

impl BatteryInputs {
    pub fn new(capacity_mah: f64, current_ma: f64, efficiency: f64) -> Self {
        Self {
            capacity_mah: Some(capacity_mah),
            current_ma: Some(current_ma),
            efficiency,
        }
    }

    /// Solve with the default configuration.
    pub fn solve(&self) -> Option<BatteryLife> {
        self.solve_with(&CalcConfig::default())
    }

    /// Estimate runtime: `hours = capacity · efficiency / current`.
    ///
    /// Returns `None` (no result to show) when a value is missing, the load
    /// current is not positive or the capacity is negative.
    pub fn solve_with(&self, config: &CalcConfig) -> Option<BatteryLife> {
        let capacity = self.capacity_mah.filter(|c| c.is_finite() && *c >= 0.0)?;
        let current = self.current_ma.filter(|i| i.is_finite() && *i > 0.0)?;
        let efficiency = config.clamp_efficiency(self.efficiency);

        let life = BatteryLife::from_hours(capacity * efficiency / current);
        debug!(
            total_hours = life.total_hours,
            efficiency,
            "battery life estimated"
        );
        Some(life)
    }
}
