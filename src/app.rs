//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - runs ingest + fitting + selection, or evaluation
//! - prints reports/plots
//! - writes optional exports

use std::io::Read;
use std::path::Path;

use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{AnalyzeArgs, Command, DemoArgs, EstimateArgs, OutputArgs};
use crate::data::synthetic::{SyntheticSpec, generate_samples};
use crate::domain::{DataSource, EvaluationRequest, EvaluationResponse, ModelKind, RunConfig};
use crate::error::AppError;
use crate::io::export::{ModelFile, read_model_file, write_model_file, write_residuals_csv, write_samples_csv};
use crate::models::{evaluate, evaluate_request};

pub mod pipeline;

/// Entry point for the `bestfit` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Estimate(args) => handle_estimate(args),
        Command::Demo(args) => handle_demo(args),
    }
}

/// Log to stderr; level from `RUST_LOG`, default `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. in tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// JSON summary printed by `analyze --json`.
#[derive(Debug, Serialize)]
struct AnalyzeSummary<'a> {
    model: ModelKind,
    coeffs: &'a [f64],
    intercept: f64,
    r2: f64,
    report_path: Option<String>,
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    let source = match (args.source.file, args.source.url) {
        (Some(path), None) => DataSource::Path(path),
        (None, Some(url)) => DataSource::Url(url),
        _ => return Err(AppError::new(2, "Provide exactly one of --file or --url.")),
    };
    let config = run_config_from_args(args.no_header, args.delimiter, &args.output)?;

    let run = pipeline::run_fit(&source, &config)?;
    emit_run(&run, &config)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let spec = SyntheticSpec {
        kind: args.kind,
        coefficients: args.coeffs,
        intercept: args.intercept,
        n: args.n,
        x_min: args.x_min,
        x_max: args.x_max,
        noise: args.noise,
        seed: args.seed,
    };
    let samples = generate_samples(&spec)?;
    info!(kind = %spec.kind, n = samples.len(), seed = spec.seed, "generated synthetic samples");

    if let Some(path) = &args.export_csv {
        write_samples_csv(path, &samples)?;
        info!(path = %path.display(), "wrote samples CSV");
    }

    let config = run_config_from_args(false, ',', &args.output)?;
    let ingest = pipeline::ingest_from_samples(samples)?;
    let source = format!("synthetic {} (seed={}, noise={})", spec.kind, spec.seed, spec.noise);
    let run = pipeline::run_fit_with_data(ingest, source)?;
    emit_run(&run, &config)
}

fn emit_run(run: &pipeline::RunOutput, config: &RunConfig) -> Result<(), AppError> {
    let best = &run.selection.best;

    if config.json {
        let summary = AnalyzeSummary {
            model: best.kind,
            coeffs: &best.coefficients,
            intercept: best.intercept,
            r2: best.score,
            report_path: config.report.as_ref().map(|p| p.display().to_string()),
        };
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| AppError::new(2, format!("Failed to serialize summary: {e}")))?;
        println!("{json}");
    } else {
        println!(
            "{}",
            crate::report::format_run_summary(&run.ingest, &run.selection, &run.source)
        );
        if config.plot {
            let plot = crate::plot::render_ascii_plot(
                &run.ingest.samples,
                best,
                config.plot_width,
                config.plot_height,
            );
            println!("{plot}");
        }
    }

    // Optional exports.
    if let Some(path) = &config.report {
        crate::report::write_report(path, best)?;
        info!(path = %path.display(), "wrote report");
    }
    if let Some(path) = &config.export_model {
        let file = ModelFile::new(best, run.ingest.samples.len(), Some(run.source.clone()));
        write_model_file(path, &file)?;
        info!(path = %path.display(), "wrote model JSON");
    }
    if let Some(path) = &config.export_residuals {
        write_residuals_csv(path, &run.residuals)?;
        info!(path = %path.display(), "wrote residuals CSV");
    }

    Ok(())
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let responses: Vec<EvaluationResponse> = if let Some(path) = &args.request {
        let req = read_request(path)?;
        vec![evaluate_request(&req)?]
    } else if let Some(path) = &args.model_file {
        let file = read_model_file(path)?;
        let model = file.model;
        evaluate_many(model.kind, &model.coefficients, model.intercept, &args.x)?
    } else if let Some(kind) = args.model {
        evaluate_many(kind, &args.coeffs, args.intercept.unwrap_or(0.0), &args.x)?
    } else {
        return Err(AppError::new(
            2,
            "Provide --model with --coeffs, --request, or --model-file.",
        ));
    };

    for resp in responses {
        let line = serde_json::to_string(&resp)
            .map_err(|e| AppError::new(2, format!("Failed to serialize result: {e}")))?;
        println!("{line}");
    }
    Ok(())
}

fn evaluate_many(
    kind: ModelKind,
    coefficients: &[f64],
    intercept: f64,
    xs: &[f64],
) -> Result<Vec<EvaluationResponse>, AppError> {
    if xs.is_empty() {
        return Err(AppError::new(2, "Provide at least one --x value."));
    }
    xs.iter()
        .map(|&x| {
            let y = evaluate(kind, coefficients, intercept, x)?;
            Ok::<_, AppError>(EvaluationResponse { x, y })
        })
        .collect()
}

fn read_request(path: &Path) -> Result<EvaluationRequest, AppError> {
    let mut raw = String::new();
    if path.as_os_str() == "-" {
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|e| AppError::new(2, format!("Failed to read request from stdin: {e}")))?;
    } else {
        raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::new(2, format!("Failed to read request '{}': {e}", path.display())))?;
    }
    serde_json::from_str(&raw).map_err(|e| AppError::new(2, format!("Invalid evaluation request: {e}")))
}

pub fn run_config_from_args(no_header: bool, delimiter: char, output: &OutputArgs) -> Result<RunConfig, AppError> {
    if !delimiter.is_ascii() {
        return Err(AppError::new(2, format!("Delimiter must be a single ASCII character, got '{delimiter}'.")));
    }
    Ok(RunConfig {
        has_header: !no_header,
        delimiter: delimiter as u8,
        plot: !output.no_plot,
        plot_width: output.width,
        plot_height: output.height,
        json: output.json,
        report: output.report.clone(),
        export_model: output.export_model.clone(),
        export_residuals: output.export_residuals.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> OutputArgs {
        OutputArgs {
            report: None,
            export_model: None,
            export_residuals: None,
            json: false,
            no_plot: true,
            width: 80,
            height: 20,
        }
    }

    #[test]
    fn run_config_maps_flags() {
        let config = run_config_from_args(true, ';', &output()).unwrap();
        assert!(!config.has_header);
        assert_eq!(config.delimiter, b';');
        assert!(!config.plot);

        assert_eq!(run_config_from_args(false, 'é', &output()).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn evaluate_many_echoes_each_x() {
        let out = evaluate_many(ModelKind::Linear, &[3.0], 1.0, &[5.0, 0.0]).unwrap();
        assert_eq!(
            out,
            vec![EvaluationResponse { x: 5.0, y: 16.0 }, EvaluationResponse { x: 0.0, y: 1.0 }]
        );
        assert_eq!(evaluate_many(ModelKind::Linear, &[3.0], 1.0, &[]).unwrap_err().exit_code(), 2);

        let err = evaluate_many(ModelKind::Logarithmic, &[1.0], 0.0, &[-1.0]).unwrap_err();
        assert!(err.to_string().contains("Domain error"));
    }
}
