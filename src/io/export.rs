//! Exports: fitted model JSON, per-sample residuals CSV, raw samples CSV.
//!
//! The model file is the "portable" representation of a fit: it holds exactly
//! what the evaluator needs (kind, coefficients, intercept) plus provenance, so
//! `bestfit estimate --model-file` can predict without refitting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{FittedModel, SampleSet};
use crate::error::AppError;
use crate::report::Residual;

pub const TOOL_NAME: &str = "bestfit";

/// A saved model file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    /// Where the samples came from (path or URL), if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub n_samples: usize,
    pub model: FittedModel,
}

impl ModelFile {
    pub fn new(model: &FittedModel, n_samples: usize, source: Option<String>) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            generated_at: Utc::now(),
            source,
            n_samples,
            model: model.clone(),
        }
    }
}

/// Write a model JSON file.
pub fn write_model_file(path: &Path, file: &ModelFile) -> Result<(), AppError> {
    let out = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create model JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(BufWriter::new(out), file)
        .map_err(|e| AppError::new(2, format!("Failed to write model JSON: {e}")))?;
    Ok(())
}

/// Read a model JSON file.
pub fn read_model_file(path: &Path) -> Result<ModelFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let model: ModelFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid model JSON: {e}")))?;
    Ok(model)
}

/// Write per-sample results to a CSV file.
///
/// Samples outside the model's domain have empty `y_fit` / `residual` cells.
pub fn write_residuals_csv(path: &Path, residuals: &[Residual]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create residuals CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "x,y_obs,y_fit,residual")
        .map_err(|e| AppError::new(2, format!("Failed to write residuals CSV header: {e}")))?;
    for r in residuals {
        writeln!(
            out,
            "{},{},{},{}",
            r.x,
            r.y_obs,
            r.y_fit.map(|v| v.to_string()).unwrap_or_default(),
            r.residual.map(|v| v.to_string()).unwrap_or_default(),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write residuals CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush residuals CSV: {e}")))?;
    Ok(())
}

/// Write raw samples as a two-column CSV (readable by `bestfit analyze`).
pub fn write_samples_csv(path: &Path, samples: &SampleSet) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create samples CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "x,y").map_err(|e| AppError::new(2, format!("Failed to write samples CSV header: {e}")))?;
    for (x, y) in samples.iter() {
        writeln!(out, "{x},{y}").map_err(|e| AppError::new(2, format!("Failed to write samples CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush samples CSV: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelKind;
    use crate::io::ingest::{IngestOptions, load_samples};

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("bestfit-test-{}-{name}", std::process::id()))
    }

    #[test]
    fn model_file_survives_disk() {
        let model = FittedModel {
            kind: ModelKind::Logarithmic,
            coefficients: vec![2.5],
            intercept: -1.0,
            score: 0.93,
            n_used: 12,
        };
        let file = ModelFile::new(&model, 14, Some("data.csv".to_string()));

        let path = temp_path("model.json");
        write_model_file(&path, &file).unwrap();
        let loaded = read_model_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, file);
        assert_eq!(loaded.tool, TOOL_NAME);
    }

    #[test]
    fn samples_csv_is_readable_by_ingest() {
        let samples = SampleSet::new(vec![0.5, 1.25, -3.0], vec![1.0, 2.0, 3.5]).unwrap();
        let path = temp_path("samples.csv");
        write_samples_csv(&path, &samples).unwrap();

        let file = File::open(&path).unwrap();
        let data = load_samples(file, &IngestOptions::default()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(data.samples, samples);
    }

    #[test]
    fn residuals_csv_leaves_out_of_domain_cells_empty() {
        let residuals = vec![
            Residual {
                x: -1.0,
                y_obs: 2.0,
                y_fit: None,
                residual: None,
            },
            Residual {
                x: 1.0,
                y_obs: 2.0,
                y_fit: Some(1.5),
                residual: Some(0.5),
            },
        ];
        let path = temp_path("residuals.csv");
        write_residuals_csv(&path, &residuals).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(text, "x,y_obs,y_fit,residual\n-1,2,,\n1,2,1.5,0.5\n");
    }
}
