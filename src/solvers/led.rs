//! LED series resistor sizing.

use tracing::debug;

use crate::error::{CalcError, Result};

/// LED circuit parameters. All three are required.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedInputs {
    /// Supply voltage (V)
    pub supply_voltage: f64,
    /// LED forward voltage (V)
    pub forward_voltage: f64,
    /// Target LED current (mA)
    pub current_ma: f64,
}

/// Sized series resistor and power budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedResult {
    /// Series resistance (Ω)
    pub resistance: f64,
    /// Power dissipated in the resistor (W)
    pub resistor_power: f64,
    /// Power dissipated in the LED (W)
    pub led_power: f64,
}

impl LedInputs {
    pub fn new(supply_voltage: f64, forward_voltage: f64, current_ma: f64) -> Self {
        Self {
            supply_voltage,
            forward_voltage,
            current_ma,
        }
    }

    /// Size the series resistor: `R = (Vs - Vf) / If`.
    pub fn solve(&self) -> Result<LedResult> {
        if self.supply_voltage <= self.forward_voltage {
            return Err(CalcError::invalid_configuration(
                "supply voltage must exceed the LED forward voltage",
            ));
        }
        if self.current_ma == 0.0 {
            return Err(CalcError::division_by_zero("LED current is zero"));
        }

        let headroom = self.supply_voltage - self.forward_voltage;
        let current = self.current_ma / 1000.0;
        let result = LedResult {
            resistance: headroom / current,
            resistor_power: headroom * current,
            led_power: self.forward_voltage * current,
        };

        debug!(
            resistance = result.resistance,
            resistor_power = result.resistor_power,
            "led resistor sized"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_led_resistor() {
        let result = LedInputs::new(5.0, 2.0, 20.0).solve().unwrap();
        assert_relative_eq!(result.resistance, 150.0, max_relative = 1e-12);
        assert_relative_eq!(result.resistor_power, 0.06, max_relative = 1e-12);
        assert_relative_eq!(result.led_power, 0.04, max_relative = 1e-12);
    }

    #[test]
    fn test_supply_must_exceed_forward_voltage() {
        let err = LedInputs::new(2.0, 2.0, 20.0).solve().unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfiguration { .. }));

        let err = LedInputs::new(1.8, 3.2, 20.0).solve().unwrap_err();
        assert!(matches!(err, CalcError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_zero_current() {
        let err = LedInputs::new(5.0, 2.0, 0.0).solve().unwrap_err();
        assert!(matches!(err, CalcError::DivisionByZero { .. }));
    }
}
