//! # Ohmkit
//!
//! Closed-form electronics calculators.
//!
//! This library provides:
//! - Series and parallel resistor network analysis
//! - Voltage divider, Ohm's law and LED series resistor solvers
//! - RC filter cutoff and capacitor charging curves
//! - Battery runtime estimation and resistor colour-code decoding
//! - SI-prefix formatting and parsing shared by all of the above
//!
//! ## Architecture
//!
//! - [`solvers`] - one stateless solver per calculator
//! - [`units`] - SI prefix selection, formatting and value parsing
//! - [`session`] - calculation modes, mode switching and the [`Workbench`]
//! - [`config`] - tolerances and presentation settings
//! - [`error`] - the unified [`CalcError`]
//!
//! ## Usage
//!
//! ### Native CLI
//!
//! ```bash
//! ohmkit divider --vin 9 --ra 1k --rb 2k
//! ohmkit rc-filter --r 1k --c 1u
//! ohmkit color brown black red gold
//! ```
//!
//! ### Library
//!
//! ```
//! use ohmkit::solvers::OhmsLawInputs;
//!
//! let result = OhmsLawInputs {
//!     voltage: Some(10.0),
//!     current: Some(2.0),
//!     ..Default::default()
//! }
//! .solve()
//! .unwrap();
//! assert_eq!(result.resistance, 5.0);
//! assert_eq!(result.power, 20.0);
//! ```
//!
//! ### WASM
//!
//! ```javascript
//! import { divider, format_with_unit } from 'ohmkit';
//!
//! const [vin, ra, rb, vout] = divider(9, 1000, 2000, NaN);
//! format_with_unit(vout, 'V'); // "6 V"
//! ```
//!
//! ## Unknown values
//!
//! Solver inputs carry one `Option<f64>` per quantity. `None` is "the user
//! left this blank" and is never confused with an entered zero. Solvers that
//! need an exact number of known values reject any other count with
//! [`CalcError::InsufficientInputs`].

pub mod config;
pub mod error;
pub mod session;
pub mod solvers;
pub mod units;

// Re-export main types for convenience
pub use config::CalcConfig;
pub use error::{CalcError, Result};
pub use session::{on_mode_change, CalculationMode, Outcome, Workbench};
pub use units::{format_scientific, format_with_unit, parse_value, ScaledValue, SiPrefix};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;
