//! Reporting utilities: residuals and formatted output.

pub mod format;

pub use format::*;

use crate::domain::{FittedModel, SampleSet};
use crate::models::evaluate_model;

/// Observed vs fitted value for one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Residual {
    pub x: f64,
    pub y_obs: f64,
    /// `None` when `x` is outside the model's domain (e.g. `x <= 0` for logarithmic).
    pub y_fit: Option<f64>,
    pub residual: Option<f64>,
}

/// Compute fitted values and residuals for each sample.
pub fn compute_residuals(samples: &SampleSet, model: &FittedModel) -> Vec<Residual> {
    samples
        .iter()
        .map(|(x, y_obs)| {
            let y_fit = evaluate_model(model, x).ok();
            Residual {
                x,
                y_obs,
                y_fit,
                residual: y_fit.map(|f| y_obs - f),
            }
        })
        .collect()
}
