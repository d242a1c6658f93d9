//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit each candidate shape by least squares (`fitter`)
//! - score candidates by in-sample R² and pick the winner (`selection`)

pub mod fitter;
pub mod selection;

pub use fitter::*;
pub use selection::*;
