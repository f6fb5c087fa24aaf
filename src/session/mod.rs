//! Calculator session state.
//!
//! The solvers themselves are stateless. This module holds the little state
//! a front-end needs around them:
//!
//! - [`CalculationMode`] and [`on_mode_change`], the explicit mode-switch
//!   transition
//! - [`SolveState`], the `Editing | Solved(derived)` machine behind the
//!   read-only marks on derived fields
//! - [`Workbench`], which owns every mode's inputs and runs the active solver

mod mode;
mod state;
mod workbench;

pub use mode::{on_mode_change, CalculationMode, ModeChangeEffects};
pub use state::SolveState;
pub use workbench::{ColorCodeForm, NetworkForm, Outcome, RcSubMode, Workbench};
