//! Design rows and coefficient layout for each model kind.
//!
//! The fitter relies on two primitive operations:
//! - build a design row for a given x (for OLS)
//! - turn the solved β vector into the public `(coefficients, intercept)` layout
//!
//! The layout produced here is the one the evaluator consumes, so the two must
//! change together.

use crate::domain::ModelKind;
use crate::math::powers;

/// Fill a design row for the given model kind.
///
/// The row includes the constant term first (intercept).
///
/// # Panics
/// Panics if `out` does not have length `kind.design_len()`. Callers should size
/// the row correctly. For `Logarithmic`, `x` must be positive; the fitter filters
/// the samples beforehand.
pub fn fill_design_row(kind: ModelKind, x: f64, out: &mut [f64]) {
    assert_eq!(out.len(), kind.design_len(), "design row length mismatch");
    match kind {
        ModelKind::Linear | ModelKind::Polynomial2 => powers(x, out),
        ModelKind::Logarithmic => {
            out[0] = 1.0;
            out[1] = x.ln();
        }
    }
}

/// Split a solved β vector (constant first) into `(coefficients, intercept)`.
///
/// `Polynomial2` keeps its constant inside the coefficient list and reports an
/// intercept of `0.0`; the other kinds carry the constant separately.
pub fn split_solution(kind: ModelKind, beta: &[f64]) -> (Vec<f64>, f64) {
    match kind {
        ModelKind::Linear | ModelKind::Logarithmic => (vec![beta[1]], beta[0]),
        ModelKind::Polynomial2 => (beta.to_vec(), 0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn design_rows_put_constant_first() {
        let mut row = [0.0; 2];
        fill_design_row(ModelKind::Linear, 4.0, &mut row);
        assert_eq!(row, [1.0, 4.0]);

        let mut row = [0.0; 3];
        fill_design_row(ModelKind::Polynomial2, 4.0, &mut row);
        assert_eq!(row, [1.0, 4.0, 16.0]);

        let mut row = [0.0; 2];
        fill_design_row(ModelKind::Logarithmic, std::f64::consts::E, &mut row);
        assert_eq!(row[0], 1.0);
        assert!((row[1] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn split_solution_matches_coefficient_len() {
        for kind in ModelKind::ALL {
            let beta: Vec<f64> = (0..kind.design_len()).map(|i| i as f64 + 1.0).collect();
            let (coefficients, _) = split_solution(kind, &beta);
            assert_eq!(coefficients.len(), kind.coefficient_len());
        }

        let (coefficients, intercept) = split_solution(ModelKind::Linear, &[5.0, 2.0]);
        assert_eq!(coefficients, vec![2.0]);
        assert_eq!(intercept, 5.0);

        let (coefficients, intercept) = split_solution(ModelKind::Polynomial2, &[5.0, 2.0, 1.0]);
        assert_eq!(coefficients, vec![5.0, 2.0, 1.0]);
        assert_eq!(intercept, 0.0);
    }
}
