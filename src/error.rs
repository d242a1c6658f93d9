//! Error types.
//!
//! Two layers:
//!
//! - [`FitError`]: the typed failure taxonomy of the fitting/evaluation core.
//! - [`AppError`]: what the binary reports (message + process exit code).
//!
//! Exit codes:
//! - `2`: usage, configuration or I/O problems
//! - `3`: insufficient or invalid data
//! - `4`: fitting or evaluation failure

use crate::domain::ModelKind;

/// Failures of the fitter and the evaluator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Fewer than two paired samples.
    #[error("Insufficient data: need at least {required} samples, got {got}.")]
    InsufficientData { required: usize, got: usize },

    /// The x and y sequences differ in length.
    #[error("Dimension mismatch: x has {x_len} values but y has {y_len}.")]
    DimensionMismatch { x_len: usize, y_len: usize },

    /// A sample value is NaN or infinite.
    #[error("Sample {index} is not a finite number.")]
    NonFiniteSample { index: usize },

    /// A single candidate could not be fitted (degenerate design, non-finite result).
    ///
    /// Non-fatal during selection: the candidate is simply excluded.
    #[error("Fit failed for {kind} model: {reason}")]
    FitFailure { kind: ModelKind, reason: String },

    /// Every candidate failed or was inapplicable.
    #[error("No viable model: every candidate failed to fit.")]
    NoViableModel,

    #[error("Unknown model kind '{0}' (expected linear, polynomial2 or logarithmic).")]
    UnknownModelKind(String),

    /// Input outside the domain of a model formula (e.g. `ln(x)` for `x <= 0`).
    #[error("Domain error: {kind} model is undefined at x={x}.")]
    DomainError { kind: ModelKind, x: f64 },

    #[error("{kind} model requires at least one coefficient.")]
    MissingCoefficients { kind: ModelKind },
}

impl FitError {
    /// Process exit code used when this error reaches the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::InsufficientData { .. }
            | FitError::DimensionMismatch { .. }
            | FitError::NonFiniteSample { .. } => 3,
            FitError::FitFailure { .. } | FitError::NoViableModel => 4,
            FitError::UnknownModelKind(_)
            | FitError::DomainError { .. }
            | FitError::MissingCoefficients { .. } => 2,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_exit_codes() {
        let err: AppError = FitError::InsufficientData { required: 2, got: 1 }.into();
        assert_eq!(err.exit_code(), 3);

        let err: AppError = FitError::NoViableModel.into();
        assert_eq!(err.exit_code(), 4);

        let err: AppError = FitError::UnknownModelKind("cubic".to_string()).into();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("cubic"));
    }
}
