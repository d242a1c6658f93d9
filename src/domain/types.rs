//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - accepted from callers that only hold plain JSON (evaluation requests)

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Candidate regression shape.
///
/// The set is closed; [`ModelKind::ALL`] is also the fixed evaluation order used
/// for tie-breaking during selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// `y = a·x + b`
    Linear,
    /// `y = c0 + c1·x + c2·x²`
    Polynomial2,
    /// `y = a·ln(x) + b`
    Logarithmic,
}

impl ModelKind {
    pub const ALL: [ModelKind; 3] = [ModelKind::Linear, ModelKind::Polynomial2, ModelKind::Logarithmic];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Linear => "Linear",
            ModelKind::Polynomial2 => "Polynomial (degree 2)",
            ModelKind::Logarithmic => "Logarithmic",
        }
    }

    /// Stable identifier used on the wire and in files.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::Linear => "linear",
            ModelKind::Polynomial2 => "polynomial2",
            ModelKind::Logarithmic => "logarithmic",
        }
    }

    /// Number of columns in the least-squares design matrix (constant included).
    pub fn design_len(self) -> usize {
        match self {
            ModelKind::Linear => 2,
            ModelKind::Polynomial2 => 3,
            ModelKind::Logarithmic => 2,
        }
    }

    /// Number of entries in [`FittedModel::coefficients`] produced by the fitter.
    pub fn coefficient_len(self) -> usize {
        match self {
            ModelKind::Linear => 1,
            ModelKind::Polynomial2 => 3,
            ModelKind::Logarithmic => 1,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = FitError;

    /// Accepts canonical names, short aliases and the legacy wire names
    /// (`lineare`, `polinomiale`, `logaritmico`) sent by existing callers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "lin" | "lineare" => Ok(ModelKind::Linear),
            "polynomial2" | "polynomial" | "poly2" | "poly" | "polinomiale" => Ok(ModelKind::Polynomial2),
            "logarithmic" | "log" | "logaritmico" => Ok(ModelKind::Logarithmic),
            _ => Err(FitError::UnknownModelKind(s.to_string())),
        }
    }
}

/// Paired observations `(x_i, y_i)`.
///
/// Validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl SampleSet {
    /// Minimum number of pairs for any fit.
    pub const MIN_SAMPLES: usize = 2;

    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, FitError> {
        if x.len() != y.len() {
            return Err(FitError::DimensionMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.len() < Self::MIN_SAMPLES {
            return Err(FitError::InsufficientData {
                required: Self::MIN_SAMPLES,
                got: x.len(),
            });
        }
        if let Some(index) = x
            .iter()
            .zip(y.iter())
            .position(|(a, b)| !(a.is_finite() && b.is_finite()))
        {
            return Err(FitError::NonFiniteSample { index });
        }
        Ok(Self { x, y })
    }

    /// Convenience constructor from borrowed slices.
    pub fn from_slices(x: &[f64], y: &[f64]) -> Result<Self, FitError> {
        Self::new(x.to_vec(), y.to_vec())
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// A fitted candidate.
///
/// Coefficient layout per kind:
/// - `Linear`: `[slope]`, constant in `intercept`
/// - `Polynomial2`: `[c0, c1, c2]` by ascending power, `intercept` is `0.0`
/// - `Logarithmic`: `[multiplier of ln(x)]`, constant in `intercept`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    pub kind: ModelKind,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// In-sample coefficient of determination (R²).
    pub score: f64,
    /// Samples the candidate was fitted and scored on (smaller than the input
    /// for `Logarithmic` when some `x <= 0`).
    pub n_used: usize,
}

/// Evaluation request as sent by callers holding plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(alias = "modello", alias = "kind")]
    pub model: String,
    #[serde(alias = "coefficients")]
    pub coeffs: Vec<f64>,
    #[serde(default)]
    pub intercept: Option<f64>,
    pub x: f64,
}

/// Predicted value with the query echoed back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub x: f64,
    pub y: f64,
}

/// Where the analyze pipeline reads its CSV from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => f.write_str(u),
        }
    }
}

/// A full analyze run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub has_header: bool,
    pub delimiter: u8,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub json: bool,

    pub report: Option<PathBuf>,
    pub export_model: Option<PathBuf>,
    pub export_residuals: Option<PathBuf>,
}
