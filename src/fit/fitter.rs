//! Low-level fitting routine for a single model kind.
//!
//! Given paired samples `(x_i, y_i)` and a model kind we:
//! - restrict the samples to the kind's domain (`x > 0` for logarithmic)
//! - build the design matrix row by row
//! - solve the OLS problem for β
//! - score the fit in-sample with R², using the evaluator so the score reflects
//!   exactly what a caller would later predict

use nalgebra::{DMatrix, DVector};

use crate::domain::{FittedModel, ModelKind, SampleSet};
use crate::error::FitError;
use crate::math::{positive_domain, r_squared, solve_least_squares};
use crate::models::{evaluate, fill_design_row, split_solution};

/// Fit a single candidate in isolation.
///
/// Returns:
/// - `Ok(Some(model))` when the candidate fitted
/// - `Ok(None)` when the candidate does not apply to these samples (logarithmic
///   with fewer than two positive x values)
/// - `Err(FitError::FitFailure)` when the system is degenerate
///
/// The logarithmic candidate is scored over its filtered subset only, so its
/// `n_used` can be smaller than `samples.len()`.
pub fn fit_candidate(kind: ModelKind, samples: &SampleSet) -> Result<Option<FittedModel>, FitError> {
    match kind {
        ModelKind::Linear | ModelKind::Polynomial2 => fit_on(kind, samples.x(), samples.y()).map(Some),
        ModelKind::Logarithmic => {
            let (x, y) = positive_domain(samples.x(), samples.y());
            if x.len() < SampleSet::MIN_SAMPLES {
                return Ok(None);
            }
            fit_on(kind, &x, &y).map(Some)
        }
    }
}

fn fit_on(kind: ModelKind, x: &[f64], y: &[f64]) -> Result<FittedModel, FitError> {
    let n = x.len();
    let p = kind.design_len();

    let mut design = DMatrix::<f64>::zeros(n, p);
    let mut row = vec![0.0; p];
    for (i, &xi) in x.iter().enumerate() {
        fill_design_row(kind, xi, &mut row);
        for (j, &v) in row.iter().enumerate() {
            design[(i, j)] = v;
        }
    }
    let target = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &target).map_err(|e| FitError::FitFailure {
        kind,
        reason: e.to_string(),
    })?;
    let (coefficients, intercept) = split_solution(kind, beta.as_slice());

    let y_fit = x
        .iter()
        .map(|&xi| evaluate(kind, &coefficients, intercept, xi))
        .collect::<Result<Vec<f64>, FitError>>()?;

    let score = r_squared(y, &y_fit);
    if !score.is_finite() {
        return Err(FitError::FitFailure {
            kind,
            reason: "non-finite R² score".to_string(),
        });
    }

    Ok(FittedModel {
        kind,
        coefficients,
        intercept,
        score,
        n_used: n,
    })
}
