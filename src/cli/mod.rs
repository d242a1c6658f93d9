//! Command-line parsing for the regression model selector.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ModelKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bestfit", version, about = "Fit linear, quadratic and logarithmic models and keep the best")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit every candidate model to a two-column CSV and report the best one.
    #[command(alias = "fit")]
    Analyze(AnalyzeArgs),
    /// Predict y for new x values from a model kind and its parameters.
    Estimate(EstimateArgs),
    /// Generate synthetic samples from a known model and analyze them.
    Demo(DemoArgs),
}

/// Where to read samples from.
#[derive(Debug, Args, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Local CSV file (column 0 = x, column 1 = y).
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Remote CSV URL (downloaded with the configured storage credentials).
    #[arg(short = 'u', long)]
    pub url: Option<String>,
}

/// Output options shared by `analyze` and `demo`.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Write the results document to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Export the winning model (kind + parameters) to JSON.
    #[arg(long = "export-model")]
    pub export_model: Option<PathBuf>,

    /// Export per-sample fitted values and residuals to CSV.
    #[arg(long = "export-residuals")]
    pub export_residuals: Option<PathBuf>,

    /// Print a JSON summary instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[derive(Debug, Args, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// The first row is data, not column names.
    #[arg(long)]
    pub no_header: bool,

    /// Field delimiter (single ASCII character).
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    /// Model kind (linear, polynomial2, logarithmic).
    #[arg(short = 'm', long, conflicts_with_all = ["request", "model_file"], requires = "coeffs")]
    pub model: Option<ModelKind>,

    /// Comma-separated coefficients (polynomial: ascending powers, constant first).
    #[arg(short = 'c', long, value_delimiter = ',', allow_hyphen_values = true)]
    pub coeffs: Vec<f64>,

    /// Constant term for linear/logarithmic models (ignored for polynomial2).
    #[arg(short = 'i', long, allow_hyphen_values = true)]
    pub intercept: Option<f64>,

    /// Query x values (repeatable).
    #[arg(short = 'x', long = "x", allow_hyphen_values = true, conflicts_with = "request")]
    pub x: Vec<f64>,

    /// JSON evaluation request file (`-` for stdin):
    /// `{"model": "linear", "coeffs": [3], "intercept": 1, "x": 5}`.
    #[arg(long, conflicts_with = "model_file")]
    pub request: Option<PathBuf>,

    /// Model JSON produced by `analyze --export-model`.
    #[arg(long)]
    pub model_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Shape to generate samples from.
    #[arg(short = 'k', long, default_value = "linear")]
    pub kind: ModelKind,

    /// Comma-separated true coefficients.
    #[arg(short = 'c', long, value_delimiter = ',', allow_hyphen_values = true, default_value = "2")]
    pub coeffs: Vec<f64>,

    /// True intercept (linear/logarithmic).
    #[arg(short = 'i', long, allow_hyphen_values = true, default_value_t = 0.0)]
    pub intercept: f64,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 50)]
    pub n: usize,

    /// Lower bound of x.
    #[arg(long, allow_hyphen_values = true, default_value_t = 1.0)]
    pub x_min: f64,

    /// Upper bound of x.
    #[arg(long, allow_hyphen_values = true, default_value_t = 10.0)]
    pub x_max: f64,

    /// Standard deviation of Gaussian noise added to y.
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Also write the generated samples to CSV.
    #[arg(long = "export-csv")]
    pub export_csv: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}
