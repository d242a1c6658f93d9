//! Model shapes: design rows for fitting and the evaluator for prediction.
//!
//! Both halves dispatch on the same closed `ModelKind` so the coefficient layout
//! written by the fitter is exactly the layout the evaluator reads.

pub mod evaluate;
pub mod model;

pub use evaluate::*;
pub use model::*;
