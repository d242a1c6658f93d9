//! Synthetic sample generation from a known model plus Gaussian noise.
//!
//! Used by `bestfit demo` and by tests that need realistic, reproducible data.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{ModelKind, SampleSet};
use crate::error::AppError;
use crate::models::evaluate;

/// Parameters of a synthetic dataset.
#[derive(Debug, Clone)]
pub struct SyntheticSpec {
    pub kind: ModelKind,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    pub n: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of the additive noise on y.
    pub noise: f64,
    pub seed: u64,
}

/// Draw `n` samples with x uniform on `[x_min, x_max]` and
/// `y = model(x) + N(0, noise²)`. Deterministic for a given seed.
pub fn generate_samples(spec: &SyntheticSpec) -> Result<SampleSet, AppError> {
    if spec.n < SampleSet::MIN_SAMPLES {
        return Err(AppError::new(
            2,
            format!("Sample count must be >= {}.", SampleSet::MIN_SAMPLES),
        ));
    }
    if !(spec.x_min.is_finite() && spec.x_max.is_finite() && spec.x_max > spec.x_min) {
        return Err(AppError::new(
            2,
            format!("Invalid x range: min={}, max={} (must be finite and max>min).", spec.x_min, spec.x_max),
        ));
    }
    if spec.kind == ModelKind::Logarithmic && spec.x_min <= 0.0 {
        return Err(AppError::new(2, "Logarithmic samples need x_min > 0."));
    }
    if spec.coefficients.len() < spec.kind.coefficient_len() && spec.kind != ModelKind::Polynomial2 {
        return Err(AppError::new(
            2,
            format!("{} model needs {} coefficient(s).", spec.kind, spec.kind.coefficient_len()),
        ));
    }

    // `!(>= 0)` also rejects NaN; `Normal::new` only rejects non-finite values.
    if !(spec.noise >= 0.0) {
        return Err(AppError::new(2, format!("Noise must be >= 0, got {}.", spec.noise)));
    }

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let normal = Normal::new(0.0, spec.noise)
        .map_err(|e| AppError::new(2, format!("Invalid noise level {}: {e}", spec.noise)))?;

    let mut x = Vec::with_capacity(spec.n);
    let mut y = Vec::with_capacity(spec.n);
    for _ in 0..spec.n {
        let xi = rng.gen_range(spec.x_min..=spec.x_max);
        let clean = evaluate(spec.kind, &spec.coefficients, spec.intercept, xi)?;
        x.push(xi);
        y.push(clean + normal.sample(&mut rng));
    }

    Ok(SampleSet::new(x, y)?)
}
