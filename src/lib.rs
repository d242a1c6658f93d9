//! `best-fit` library crate.
//!
//! Fits linear, quadratic and logarithmic regression models to paired samples,
//! keeps the one with the highest in-sample R², and evaluates fitted models on
//! new inputs.
//!
//! The binary (`bestfit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fitter and evaluator are reusable behind other front-ends

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;

pub use domain::{EvaluationRequest, EvaluationResponse, FittedModel, ModelKind, SampleSet};
pub use error::{AppError, FitError};
pub use fit::{FitSelection, fit_and_select, fit_best};
pub use models::{evaluate, evaluate_model, evaluate_request};
