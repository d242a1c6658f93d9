//! Shared "analyze pipeline" logic used by the `analyze` and `demo` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! source -> ingest -> fit/select -> residuals
//!
//! The commands can then focus on presentation (printing vs exporting).

use std::fs::File;

use tracing::{debug, info, warn};

use crate::domain::{DataSource, RunConfig, SampleSet};
use crate::error::AppError;
use crate::fit::selection::{FitSelection, fit_and_select};
use crate::io::download::{StorageClient, ensure_csv_url};
use crate::io::ingest::{IngestOptions, IngestedData, compute_stats, load_samples};
use crate::report::{Residual, compute_residuals};

/// All computed outputs of a single analyze run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub source: String,
    pub ingest: IngestedData,
    pub selection: FitSelection,
    pub residuals: Vec<Residual>,
}

/// Execute the full pipeline for a CSV source.
pub fn run_fit(source: &DataSource, config: &RunConfig) -> Result<RunOutput, AppError> {
    let opts = IngestOptions {
        has_header: config.has_header,
        delimiter: config.delimiter,
    };
    let ingest = load_source(source, &opts)?;
    run_fit_with_data(ingest, source.to_string())
}

/// Execute the fitting stage on already-ingested data.
pub fn run_fit_with_data(ingest: IngestedData, source: String) -> Result<RunOutput, AppError> {
    let selection = fit_and_select(&ingest.samples)?;
    for fit in &selection.fits {
        debug!(
            kind = %fit.kind,
            score = fit.score,
            n_used = fit.n_used,
            "candidate fitted"
        );
    }
    for (kind, reason) in &selection.skipped {
        debug!(kind = %kind, reason = %reason, "candidate excluded");
    }
    info!(kind = %selection.best.kind, score = selection.best.score, "model selected");

    let residuals = compute_residuals(&ingest.samples, &selection.best);

    Ok(RunOutput {
        source,
        ingest,
        selection,
        residuals,
    })
}

/// Wrap in-memory samples (e.g. synthetic ones) as ingested data.
pub fn ingest_from_samples(samples: SampleSet) -> Result<IngestedData, AppError> {
    let stats = compute_stats(&samples).ok_or_else(|| AppError::new(3, "No samples to analyze."))?;
    let n = samples.len();
    Ok(IngestedData {
        samples,
        stats,
        columns: ("x".to_string(), "y".to_string()),
        row_errors: Vec::new(),
        rows_read: n,
        rows_used: n,
    })
}

/// Read and parse the CSV behind `source`.
pub fn load_source(source: &DataSource, opts: &IngestOptions) -> Result<IngestedData, AppError> {
    let ingest = match source {
        DataSource::Path(path) => {
            info!(path = %path.display(), "reading CSV");
            let file = File::open(path)
                .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
            load_samples(file, opts)?
        }
        DataSource::Url(url) => {
            ensure_csv_url(url)?;
            let client = StorageClient::from_env()?;
            info!(url = %url, "downloading CSV");
            let body = client.fetch(url)?;
            debug!(bytes = body.len(), "download complete");
            load_samples(body.as_slice(), opts)?
        }
    };

    for err in &ingest.row_errors {
        warn!(line = err.line, "skipped row: {}", err.message);
    }
    info!(
        rows_read = ingest.rows_read,
        rows_used = ingest.rows_used,
        "ingest complete"
    );

    Ok(ingest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModelKind;

    fn config() -> RunConfig {
        RunConfig {
            has_header: true,
            delimiter: b',',
            plot: false,
            plot_width: 40,
            plot_height: 10,
            json: false,
            report: None,
            export_model: None,
            export_residuals: None,
        }
    }

    #[test]
    fn run_fit_reads_a_local_csv() {
        let path = std::env::temp_dir().join(format!("bestfit-pipeline-{}.csv", std::process::id()));
        std::fs::write(&path, "x,y\n1,1\n2,4\n3,9\n4,16\n").unwrap();

        let run = run_fit(&DataSource::Path(path.clone()), &config()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(run.selection.best.kind, ModelKind::Polynomial2);
        assert_eq!(run.residuals.len(), 4);
        for r in &run.residuals {
            assert!(r.residual.unwrap().abs() < 1e-9);
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = run_fit(&DataSource::Path("/definitely/not/here.csv".into()), &config()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn non_csv_url_is_rejected_before_download() {
        let err = load_source(
            &DataSource::Url("https://example.invalid/data.xlsx".to_string()),
            &IngestOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("CSV"));
    }
}
