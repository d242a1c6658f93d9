//! CSV ingest and normalization.
//!
//! This module is responsible for turning a two-column table into a validated
//! [`SampleSet`] (column 0 = x, column 1 = y).
//!
//! Design goals:
//! - **Strict schema**: at least two columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Separation of concerns**: no fitting logic here

use std::io::Read;

use crate::domain::SampleSet;
use crate::error::AppError;

/// CSV parsing options.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    pub has_header: bool,
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
        }
    }
}

/// Summary stats about the samples actually used for fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: validated samples + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub samples: SampleSet,
    pub stats: DatasetStats,
    /// Column names from the header row (`["x", "y"]` when there is none).
    pub columns: (String, String),
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a two-column CSV into a [`SampleSet`].
pub fn load_samples<R: Read>(reader: R, opts: &IngestOptions) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(opts.has_header)
        .delimiter(opts.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut columns = ("x".to_string(), "y".to_string());
    if opts.has_header {
        let headers = reader
            .headers()
            .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?;
        if headers.len() < 2 {
            return Err(AppError::new(2, "The file must have at least 2 columns."));
        }
        columns = (
            normalize_header_name(&headers[0]),
            normalize_header_name(&headers[1]),
        );
    }

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;
    let mut saw_wide_row = opts.has_header;

    for (idx, result) in reader.records().enumerate() {
        // Line numbers are 1-based and the header (if any) occupies line 1.
        let line = idx + if opts.has_header { 2 } else { 1 };
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        if record.len() >= 2 {
            saw_wide_row = true;
        }

        match parse_pair(record.get(0), record.get(1)) {
            Ok((xi, yi)) => {
                x.push(xi);
                y.push(yi);
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if !saw_wide_row && rows_read > 0 {
        return Err(AppError::new(2, "The file must have at least 2 columns."));
    }

    let rows_used = x.len();
    if rows_used < SampleSet::MIN_SAMPLES {
        return Err(AppError::new(
            3,
            format!(
                "Need at least {} valid rows, found {rows_used} (of {rows_read} read).",
                SampleSet::MIN_SAMPLES
            ),
        ));
    }

    let samples = SampleSet::new(x, y)?;
    let stats = compute_stats(&samples)
        .ok_or_else(|| AppError::new(3, "No valid samples remain after parsing."))?;

    Ok(IngestedData {
        samples,
        stats,
        columns,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. Strip it so reports show the real column name.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

fn parse_pair(x: Option<&str>, y: Option<&str>) -> Result<(f64, f64), String> {
    let x = parse_number(x, "x")?;
    let y = parse_number(y, "y")?;
    Ok((x, y))
}

fn parse_number(field: Option<&str>, name: &str) -> Result<f64, String> {
    let raw = field.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(format!("Missing {name} value."));
    }
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("Invalid {name} value '{raw}'."))?;
    if !value.is_finite() {
        return Err(format!("Non-finite {name} value '{raw}'."));
    }
    Ok(value)
}

/// Compute range stats over the samples.
pub fn compute_stats(samples: &SampleSet) -> Option<DatasetStats> {
    if samples.is_empty() {
        return None;
    }
    let mut stats = DatasetStats {
        n_points: samples.len(),
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };
    for (x, y) in samples.iter() {
        stats.x_min = stats.x_min.min(x);
        stats.x_max = stats.x_max.max(x);
        stats.y_min = stats.y_min.min(y);
        stats.y_max = stats.y_max.max(y);
    }
    Some(stats)
}
