//! Basis helpers applied to x before the least-squares solve.
//!
//! - polynomial powers `x^0, x^1, ..., x^d`
//! - the positive-domain restriction used by the logarithmic candidate

/// Fill `out` with `x^0, x^1, ...` (one entry per slot).
pub fn powers(x: f64, out: &mut [f64]) {
    let mut acc = 1.0;
    for slot in out.iter_mut() {
        *slot = acc;
        acc *= x;
    }
}

/// Restrict paired samples to the pairs where `ln(x)` is defined (`x > 0`).
///
/// Returns the surviving `(x, y)` columns in input order.
pub fn positive_domain(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    x.iter()
        .zip(y.iter())
        .filter(|(xi, _)| **xi > 0.0)
        .map(|(&xi, &yi)| (xi, yi))
        .unzip()
}
