//! Mathematical utilities: basis transforms, least squares and R² scoring.

pub mod basis;
pub mod ols;
pub mod score;

pub use basis::*;
pub use ols::*;
pub use score::*;
