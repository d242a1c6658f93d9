//! Goodness-of-fit scoring.

/// Arithmetic mean. Returns `NaN` for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Coefficient of determination `R² = 1 - SS_res / SS_tot`.
///
/// When `y` is constant (`SS_tot = 0`) the ratio is undefined; we return `1.0`
/// for a perfect prediction and `0.0` otherwise, so the score stays finite.
///
/// # Panics
/// Panics if `y` and `y_fit` differ in length.
pub fn r_squared(y: &[f64], y_fit: &[f64]) -> f64 {
    assert_eq!(y.len(), y_fit.len(), "r_squared: length mismatch");

    let y_bar = mean(y);
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&obs, &fit) in y.iter().zip(y_fit.iter()) {
        let r = obs - fit;
        let d = obs - y_bar;
        ss_res += r * r;
        ss_tot += d * d;
    }

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fit_scores_one() {
        let y = [1.0, 2.0, 3.0];
        assert_eq!(r_squared(&y, &y), 1.0);
    }

    #[test]
    fn predicting_the_mean_scores_zero() {
        let y = [1.0, 2.0, 3.0];
        let fit = [2.0, 2.0, 2.0];
        assert!(r_squared(&y, &fit).abs() < 1e-12);
    }

    #[test]
    fn worse_than_mean_scores_negative() {
        let y = [1.0, 2.0, 3.0];
        let fit = [3.0, 2.0, 1.0];
        // SS_res = 8, SS_tot = 2
        assert!((r_squared(&y, &fit) - (-3.0)).abs() < 1e-12);
    }

    #[test]
    fn constant_target_stays_finite() {
        let y = [5.0, 5.0, 5.0];
        assert_eq!(r_squared(&y, &[5.0, 5.0, 5.0]), 1.0);
        assert_eq!(r_squared(&y, &[5.0, 5.0, 6.0]), 0.0);
    }
}
