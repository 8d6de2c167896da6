use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{SessionInfo, TelemetrySample};
use crate::input::{LapRecording, TelemetrySource};

/// Lap telemetry stored as CSV, one sample per row
///
/// Supports flexible column names (case-insensitive):
/// - x / pos_x, y / pos_y
/// - speed / v / speed_kph
/// - time / elapsed / elapsed_time / t / timestamp
///
/// CSV carries no session metadata, so the recording gets the default
/// "Unknown Track" / "Unknown Date" labels.
#[derive(Debug, Clone)]
pub struct CsvLapFile {
    path: PathBuf,
}

impl CsvLapFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TelemetrySource for CsvLapFile {
    fn load(&self) -> Result<LapRecording> {
        Ok(LapRecording {
            info: SessionInfo::default(),
            samples: load_csv(&self.path)?,
        })
    }
}

/// Load telemetry samples from a CSV file
pub fn load_csv(path: &Path) -> Result<Vec<TelemetrySample>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let headers = rdr.headers()?;
    let columns = detect_columns(headers)?;

    let mut samples = Vec::new();
    for (row, result) in rdr.records().enumerate() {
        let record = result.context("Failed to read CSV row")?;
        // Row numbers are 1-based and skip the header line
        let line = row + 2;

        let x = parse_number(&record, columns.x, "x", line)?;
        let y = parse_number(&record, columns.y, "y", line)?;
        let speed = parse_number(&record, columns.speed, "speed", line)?;

        let time_cell = record
            .get(columns.time)
            .with_context(|| format!("Missing time column at line {}", line))?;
        let elapsed_time = parse_elapsed(time_cell)
            .with_context(|| format!("Failed to parse time {:?} at line {}", time_cell, line))?;

        samples.push(TelemetrySample::new(x, y, speed, elapsed_time));
    }

    debug!("CSV loaded: {} samples from {}", samples.len(), path.display());
    Ok(samples)
}

/// Parse an elapsed-time cell
///
/// Accepts plain seconds (`83.456`), clock form (`01:23.456`,
/// `00:01:23.456`) and pandas timedeltas (`0 days 00:01:23.456000`).
pub fn parse_elapsed(cell: &str) -> Option<f64> {
    let cell = cell.trim();

    let (days, clock) = match cell.split_once(" days ").or_else(|| cell.split_once(" day ")) {
        Some((days, rest)) => (days.trim().parse::<f64>().ok()?, rest.trim()),
        None => (0.0, cell),
    };

    let mut seconds = 0.0;
    for part in clock.split(':') {
        let value = part.parse::<f64>().ok()?;
        seconds = seconds * 60.0 + value;
    }
    if clock.split(':').count() > 3 {
        return None;
    }

    Some(days * 86_400.0 + seconds)
}

struct Columns {
    x: usize,
    y: usize,
    speed: usize,
    time: usize,
}

/// Detect column indices from CSV headers
fn detect_columns(headers: &csv::StringRecord) -> Result<Columns> {
    Ok(Columns {
        x: find_column(headers, &["x", "pos_x"])?,
        y: find_column(headers, &["y", "pos_y"])?,
        speed: find_column(headers, &["speed", "v", "speed_kph"])?,
        time: find_column(headers, &["time", "elapsed", "elapsed_time", "t", "timestamp"])?,
    })
}

/// Find a column by checking possible names
fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Result<usize> {
    for (idx, header) in headers.iter().enumerate() {
        let header_lower = header.trim().to_lowercase();
        if names.iter().any(|&name| header_lower == name) {
            return Ok(idx);
        }
    }

    anyhow::bail!("Could not find column with names: {:?}", names)
}

fn parse_number(record: &csv::StringRecord, idx: usize, name: &str, line: usize) -> Result<f64> {
    let cell = record
        .get(idx)
        .with_context(|| format!("Missing {} column at line {}", name, line))?;
    cell.trim()
        .parse::<f64>()
        .with_context(|| format!("Failed to parse {} {:?} at line {}", name, cell, line))
}
