//! Ordinary least squares solver.
//!
//! Every candidate in this project is linear in its parameters once x has been
//! mapped through the candidate's basis (`[1, x]`, `[1, x, x²]`, `[1, ln x]`), so
//! a single routine solves them all:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - We use SVD to solve the least-squares problem robustly even when
//!   the design matrix is tall (more rows than columns).
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)
//! - Unlike a plain SVD pseudo-inverse we refuse rank-deficient systems. A
//!   minimum-norm solution for e.g. all-identical x would silently report a
//!   "fit" that the caller cannot distinguish from a real one.

use nalgebra::{DMatrix, DVector};

/// Why a least-squares system could not be solved.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolveError {
    #[error("design matrix is rank deficient (rank {rank} < {cols} columns)")]
    RankDeficient { rank: usize, cols: usize },

    #[error("SVD solve failed: {0}")]
    Svd(&'static str),

    #[error("solution contains non-finite values")]
    NonFinite,
}

/// Numerical rank threshold: `σ_max · max(n, p) · ε`.
fn rank_tolerance(x: &DMatrix<f64>, sigma_max: f64) -> f64 {
    sigma_max * (x.nrows().max(x.ncols()) as f64) * f64::EPSILON
}

/// Solve a least squares problem using SVD.
///
/// Returns an error if the design matrix does not have full column rank or the
/// solution is not finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<DVector<f64>, SolveError> {
    let cols = x.ncols();
    if x.nrows() == 0 || cols == 0 {
        return Err(SolveError::RankDeficient { rank: 0, cols });
    }

    let svd = x.clone().svd(true, true);
    let sigma_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    if !sigma_max.is_finite() {
        return Err(SolveError::NonFinite);
    }

    let tol = rank_tolerance(x, sigma_max);
    let rank = svd.rank(tol);
    if rank < cols {
        return Err(SolveError::RankDeficient { rank, cols });
    }

    let beta = svd.solve(y, tol).map_err(SolveError::Svd)?;
    if beta.iter().all(|v| v.is_finite()) {
        Ok(beta)
    } else {
        Err(SolveError::NonFinite)
    }
}
