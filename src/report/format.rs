//! Formatted terminal output and the standalone results document.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::domain::FittedModel;
use crate::error::AppError;
use crate::fit::selection::FitSelection;
use crate::io::ingest::IngestedData;

/// Format the full run summary (dataset stats + candidate diagnostics + chosen model).
pub fn format_run_summary(ingest: &IngestedData, selection: &FitSelection, source: &str) -> String {
    let mut out = String::new();

    out.push_str("=== bestfit - regression model selection ===\n");
    out.push_str(&format!("Source: {source}\n"));
    out.push_str(&format!(
        "Columns: x={} | y={}\n",
        ingest.columns.0, ingest.columns.1
    ));
    out.push_str(&format!(
        "Rows: read={} | used={} | skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    out.push_str(&format!(
        "Samples: n={} | x=[{:.4}, {:.4}] | y=[{:.4}, {:.4}]\n",
        ingest.stats.n_points, ingest.stats.x_min, ingest.stats.x_max, ingest.stats.y_min, ingest.stats.y_max
    ));

    out.push_str("\nCandidates:\n");
    for fit in &selection.fits {
        let chosen = if fit.kind == selection.best.kind { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:<22} R2={:.6} n={:<5} coeffs={} intercept={:.6}\n",
            fit.kind.display_name(),
            fit.score,
            fit.n_used,
            fmt_vec(&fit.coefficients),
            fit.intercept
        ));
    }
    for (kind, reason) in &selection.skipped {
        out.push_str(&format!("  (skipped {}) {reason}\n", kind.display_name()));
    }

    out.push_str("\nChosen model:\n");
    out.push_str(&format!(
        "- {} (kind={})\n",
        selection.best.kind.display_name(),
        selection.best.kind
    ));
    out.push_str(&format!("- coefficients: {}\n", fmt_vec(&selection.best.coefficients)));
    out.push_str(&format!("- intercept   : {:.6}\n", selection.best.intercept));
    out.push_str(&format!("- R2          : {:.6}\n", selection.best.score));

    out
}

/// Format the standalone results document.
pub fn format_report(model: &FittedModel, generated_at: DateTime<Local>) -> String {
    let mut out = String::new();
    out.push_str("Regression results\n");
    out.push_str("==================\n\n");
    out.push_str(&format!("Generated: {}\n\n", generated_at.format("%Y-%m-%d %H:%M:%S %z")));
    out.push_str(&format!("Model: {}\n", model.kind));
    out.push_str(&format!("Coefficients: {}\n", fmt_vec(&model.coefficients)));
    out.push_str(&format!("Intercept: {}\n", model.intercept));
    out.push_str(&format!("R²: {:.4}\n", model.score));
    out
}

/// Write the results document to `path`.
pub fn write_report(path: &Path, model: &FittedModel) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create report '{}': {e}", path.display())))?;
    file.write_all(format_report(model, Local::now()).as_bytes())
        .map_err(|e| AppError::new(2, format!("Failed to write report: {e}")))?;
    Ok(())
}

pub(crate) fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::domain::{ModelKind, SampleSet};
    use crate::fit::selection::fit_and_select;
    use crate::io::ingest::{RowError, compute_stats};

    #[test]
    fn report_golden_snapshot() {
        let model = FittedModel {
            kind: ModelKind::Linear,
            coefficients: vec![2.0],
            intercept: 0.5,
            score: 0.987654,
            n_used: 5,
        };
        let at = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let txt = format_report(&model, at);

        let expected_header = "Regression results\n==================\n\nGenerated: 2025-01-02 03:04:05";
        assert!(txt.starts_with(expected_header), "{txt}");
        assert!(txt.ends_with(concat!(
            "Model: linear\n",
            "Coefficients: [2.000000]\n",
            "Intercept: 0.5\n",
            "R²: 0.9877\n",
        )));
    }

    #[test]
    fn summary_marks_chosen_and_skipped_candidates() {
        let samples = SampleSet::new(vec![-2.0, -1.0, 0.0, 1.0], vec![4.0, 1.0, 0.0, 1.0]).unwrap();
        let selection = fit_and_select(&samples).unwrap();
        let ingest = IngestedData {
            stats: compute_stats(&samples).unwrap(),
            samples,
            columns: ("x".to_string(), "y".to_string()),
            row_errors: vec![RowError {
                line: 3,
                message: "Invalid x value 'a'.".to_string(),
            }],
            rows_read: 5,
            rows_used: 4,
        };

        let txt = format_run_summary(&ingest, &selection, "data.csv");
        assert!(txt.contains("Source: data.csv"));
        assert!(txt.contains("Rows: read=5 | used=4 | skipped=1"));
        assert!(txt.contains("* Polynomial (degree 2)"));
        assert!(txt.contains("(skipped Logarithmic)"));
        assert!(txt.contains("kind=polynomial2"));
    }
}
