pub mod csv;
pub mod json;

pub use csv::{load_csv, CsvLapFile};
pub use json::{load_json, JsonLapFile};

use anyhow::Result;
use std::path::Path;

use crate::core::{SessionInfo, TelemetrySample};

/// Raw samples plus display metadata, as produced by a telemetry source
#[derive(Debug, Clone)]
pub struct LapRecording {
    pub info: SessionInfo,
    pub samples: Vec<TelemetrySample>,
}

/// Anything that can produce a recorded lap
///
/// The engine never talks to data providers itself; adapters implement
/// this and hand over raw samples.
pub trait TelemetrySource {
    fn load(&self) -> Result<LapRecording>;
}

impl TelemetrySource for LapRecording {
    fn load(&self) -> Result<LapRecording> {
        Ok(self.clone())
    }
}

/// Input format detection result
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputFormat {
    Csv,
    Json,
    Unknown,
}

/// Detect the format of a lap file from its contents
pub fn detect_format(data: &[u8]) -> InputFormat {
    if is_json(data) {
        return InputFormat::Json;
    }

    if is_csv(data) {
        return InputFormat::Csv;
    }

    InputFormat::Unknown
}

fn is_json(data: &[u8]) -> bool {
    data.iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|&b| b == b'{')
}

fn is_csv(data: &[u8]) -> bool {
    // Look for a line with at least two commas in the first 500 bytes
    let sample = String::from_utf8_lossy(&data[..data.len().min(500)]);
    sample
        .lines()
        .take(5)
        .any(|line| line.chars().filter(|&c| c == ',').count() >= 2)
}

/// Load a lap from a file, auto-detecting format
pub fn load_file(path: &Path) -> Result<LapRecording> {
    let data = std::fs::read(path)?;

    match detect_format(&data) {
        InputFormat::Csv => CsvLapFile::new(path).load(),
        InputFormat::Json => JsonLapFile::new(path).load(),
        InputFormat::Unknown => anyhow::bail!("Unknown lap file format: {}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(b"  \n{ \"samples\": [] }"), InputFormat::Json);
        assert_eq!(detect_format(b"x,y,speed,time\n0,0,1,0\n"), InputFormat::Csv);
        assert_eq!(detect_format(b"hello world"), InputFormat::Unknown);
        assert_eq!(detect_format(b""), InputFormat::Unknown);
    }

    #[test]
    fn test_load_file_dispatches_on_content() {
        let dir = std::env::temp_dir().join(format!("lap-replay-input-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("lap.dat");
        std::fs::write(
            &json_path,
            r#"{ "driver": "NOR", "samples": [{ "x": 0, "y": 0, "speed": 1, "time": 0 }] }"#,
        )
        .unwrap();
        assert_eq!(load_file(&json_path).unwrap().info.driver, "NOR");

        let text_path = dir.join("notes.txt");
        std::fs::write(&text_path, "just some notes").unwrap();
        assert!(load_file(&text_path).is_err());
    }
}
