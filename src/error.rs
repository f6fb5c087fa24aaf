//! Error types for the ohmkit calculators.
//!
//! This module provides a unified error type [`CalcError`] covering every
//! way a solve can be rejected, plus the few errors raised by the front-ends
//! (value parsing, list editing, mode and colour lookup).
//!
//! All variants are validation-level: they never leave a solver or form in a
//! partially updated state, and their `Display` text is meant to be shown to
//! the user as-is.

use thiserror::Error;

/// Result type alias using [`CalcError`].
pub type Result<T> = std::result::Result<T, CalcError>;

/// Unified error type for all ohmkit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    // ============ Solver Errors ============
    /// Wrong number of known quantities for a solver that needs an exact count
    #[error("{solver}: need exactly {expected} known values, got {found}")]
    InsufficientInputs {
        solver: &'static str,
        expected: usize,
        found: usize,
    },

    /// A formula's denominator evaluates to zero
    #[error("Division by zero: {context}")]
    DivisionByZero { context: String },

    /// Inputs violate a physical precondition
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A derived resistance came out negative
    #[error("{quantity} solves to a negative value ({value:.4}); check the inputs")]
    NegativeResult { quantity: &'static str, value: f64 },

    // ============ Input Errors ============
    /// A textual value could not be parsed as a number
    #[error("Invalid value '{input}'")]
    InvalidValue { input: String },

    /// Unknown resistor band colour name
    #[error("Unknown band colour '{name}'")]
    UnknownColor { name: String },

    /// Unknown calculation mode name
    #[error("Unknown calculation mode '{name}'")]
    UnknownMode { name: String },

    /// Colour codes come in 4 or 5 bands only
    #[error("Unsupported band count {count} (expected 4 or 5)")]
    InvalidBandCount { count: usize },

    // ============ Resistor List Errors ============
    /// Refused to remove the only resistor of a network
    #[error("A network must contain at least one resistor")]
    LastResistor,

    /// No resistor with the given id
    #[error("Resistor #{id} not found")]
    ResistorNotFound { id: u32 },
}

impl CalcError {
    /// Create an insufficient inputs error
    pub fn insufficient(solver: &'static str, expected: usize, found: usize) -> Self {
        Self::InsufficientInputs {
            solver,
            expected,
            found,
        }
    }

    /// Create a division by zero error
    pub fn division_by_zero(context: impl Into<String>) -> Self {
        Self::DivisionByZero {
            context: context.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create a negative result error
    pub fn negative(quantity: &'static str, value: f64) -> Self {
        Self::NegativeResult { quantity, value }
    }

    /// Create an invalid value error
    pub fn invalid_value(input: impl Into<String>) -> Self {
        Self::InvalidValue {
            input: input.into(),
        }
    }
}
