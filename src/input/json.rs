use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{SessionInfo, TelemetrySample};
use crate::input::{LapRecording, TelemetrySource};

/// Lap recording stored as JSON, with session metadata
///
/// ```json
/// { "event_name": "Monaco Grand Prix", "date": "2024-05-26", "driver": "VER",
///   "samples": [{ "x": 0.0, "y": 0.0, "speed": 101.0, "time": 0.0 }] }
/// ```
#[derive(Debug, Clone)]
pub struct JsonLapFile {
    path: PathBuf,
}

impl JsonLapFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TelemetrySource for JsonLapFile {
    fn load(&self) -> Result<LapRecording> {
        load_json(&self.path)
    }
}

#[derive(Deserialize)]
struct LapDocument {
    event_name: Option<String>,
    date: Option<NaiveDate>,
    driver: Option<String>,
    samples: Vec<TelemetrySample>,
}

/// Load a lap recording from a JSON file
pub fn load_json(path: &Path) -> Result<LapRecording> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    parse_json(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn parse_json(contents: &str) -> Result<LapRecording> {
    let doc: LapDocument = serde_json::from_str(contents)?;
    let defaults = SessionInfo::default();

    Ok(LapRecording {
        info: SessionInfo {
            event_name: doc.event_name.unwrap_or(defaults.event_name),
            date: doc.date,
            driver: doc.driver.unwrap_or(defaults.driver),
        },
        samples: doc.samples,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let recording = parse_json(
            r#"{
                "event_name": "Monaco Grand Prix",
                "date": "2024-05-26",
                "driver": "Verstappen",
                "samples": [
                    { "x": 0.0, "y": 1.0, "speed": 101.0, "time": 0.0 },
                    { "x": 2.0, "y": 3.0, "speed": 110.0, "elapsed_time": 0.25 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(recording.info.driver, "Verstappen");
        assert_eq!(recording.info.date_label(), "2024-05-26");
        assert_eq!(recording.samples.len(), 2);
        assert_eq!(recording.samples[1].elapsed_time, 0.25);
    }

    #[test]
    fn test_missing_metadata_uses_defaults() {
        let recording =
            parse_json(r#"{ "samples": [{ "x": 0, "y": 0, "speed": 1, "time": 0 }] }"#).unwrap();
        assert_eq!(recording.info, SessionInfo::default());
    }

    #[test]
    fn test_bad_date_is_an_error() {
        assert!(parse_json(r#"{ "date": "26/05/2024", "samples": [] }"#).is_err());
    }
}
