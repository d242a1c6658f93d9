//! Inverse evaluator: predict y for a new x from previously fitted parameters.
//!
//! The evaluator trusts its inputs (it never refits or checks them against any
//! data) and is a pure function, so it can be called from any thread.
//!
//! Formulas:
//! - Linear: `coefficients[0] * x + intercept`
//! - Polynomial2: `Σ coefficients[i] * x^i` (the `intercept` argument is ignored;
//!   the constant term is `coefficients[0]`)
//! - Logarithmic: `coefficients[0] * ln(x) + intercept`, only for `x > 0`

use crate::domain::{EvaluationRequest, EvaluationResponse, FittedModel, ModelKind};
use crate::error::FitError;

/// Predict `y(x)` for the given model kind and parameters.
pub fn evaluate(kind: ModelKind, coefficients: &[f64], intercept: f64, x: f64) -> Result<f64, FitError> {
    match kind {
        ModelKind::Linear => {
            let slope = first_coefficient(kind, coefficients)?;
            Ok(slope * x + intercept)
        }
        ModelKind::Polynomial2 => {
            // Horner, highest power first.
            Ok(coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c))
        }
        ModelKind::Logarithmic => {
            // `!(x > 0)` also rejects NaN.
            if !(x > 0.0) {
                return Err(FitError::DomainError { kind, x });
            }
            let multiplier = first_coefficient(kind, coefficients)?;
            Ok(multiplier * x.ln() + intercept)
        }
    }
}

/// Predict `y(x)` from a fitted model.
pub fn evaluate_model(model: &FittedModel, x: f64) -> Result<f64, FitError> {
    evaluate(model.kind, &model.coefficients, model.intercept, x)
}

/// Serve a plain-JSON evaluation request.
///
/// The model name is parsed here, so an unrecognised name surfaces as
/// [`FitError::UnknownModelKind`]; a missing intercept defaults to `0`.
pub fn evaluate_request(req: &EvaluationRequest) -> Result<EvaluationResponse, FitError> {
    let kind: ModelKind = req.model.parse()?;
    let y = evaluate(kind, &req.coeffs, req.intercept.unwrap_or(0.0), req.x)?;
    Ok(EvaluationResponse { x: req.x, y })
}

fn first_coefficient(kind: ModelKind, coefficients: &[f64]) -> Result<f64, FitError> {
    coefficients
        .first()
        .copied()
        .ok_or(FitError::MissingCoefficients { kind })
}
