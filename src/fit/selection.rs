//! Model selection (Linear vs Polynomial2 vs Logarithmic) by in-sample R².
//!
//! Every candidate in [`ModelKind::ALL`] is tried in that fixed order:
//! - candidates that do not apply (logarithmic without two positive x) are skipped
//! - candidates whose fit is degenerate are excluded, not fatal
//! - the remaining fits are reduced by a first-seen arg-max: a later candidate
//!   replaces the incumbent only with a strictly greater score, so ties keep the
//!   earlier (simpler) shape
//!
//! Scores are compared as-is. The logarithmic R² is computed over its `x > 0`
//! subset while the other two use every sample; `FittedModel::n_used` records
//! which.

use crate::domain::{FittedModel, ModelKind, SampleSet};
use crate::error::FitError;
use crate::fit::fitter::fit_candidate;

/// Output of fitting + selection.
#[derive(Debug, Clone)]
pub struct FitSelection {
    pub best: FittedModel,
    /// Fits for all candidates that produced a model, in evaluation order.
    pub fits: Vec<FittedModel>,
    /// Candidates that were skipped or failed and why (for diagnostics).
    pub skipped: Vec<(ModelKind, String)>,
}

/// Fit every candidate and select the best one.
pub fn fit_and_select(samples: &SampleSet) -> Result<FitSelection, FitError> {
    let mut fits = Vec::with_capacity(ModelKind::ALL.len());
    let mut skipped = Vec::new();

    for kind in ModelKind::ALL {
        match fit_candidate(kind, samples) {
            Ok(Some(fit)) => fits.push(fit),
            Ok(None) => skipped.push((
                kind,
                format!("Inapplicable: fewer than {} samples with x > 0", SampleSet::MIN_SAMPLES),
            )),
            Err(err) => skipped.push((kind, err.to_string())),
        }
    }

    let best = select_best(&fits).cloned().ok_or(FitError::NoViableModel)?;

    Ok(FitSelection { best, fits, skipped })
}

/// Fit the candidates on raw columns and return only the winner.
pub fn fit_best(x: &[f64], y: &[f64]) -> Result<FittedModel, FitError> {
    let samples = SampleSet::from_slices(x, y)?;
    fit_and_select(&samples).map(|selection| selection.best)
}

/// Stable first-seen arg-max by score.
pub fn select_best(fits: &[FittedModel]) -> Option<&FittedModel> {
    fits.iter().fold(None, |best: Option<&FittedModel>, fit| match best {
        Some(b) if fit.score <= b.score => Some(b),
        _ => Some(fit),
    })
}
