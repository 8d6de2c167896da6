use serde::{Deserialize, Serialize};

use crate::core::error::{ensure_finite, ReplayError, ReplayResult};

/// One recorded telemetry instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    /// Track-local position
    pub x: f64,
    pub y: f64,

    /// Speed in the source's unit (km/h for most lap data)
    pub speed: f64,

    /// Seconds since the start of the lap
    #[serde(alias = "time", alias = "elapsed")]
    pub elapsed_time: f64,
}

impl TelemetrySample {
    pub fn new(x: f64, y: f64, speed: f64, elapsed_time: f64) -> Self {
        Self {
            x,
            y,
            speed,
            elapsed_time,
        }
    }
}

/// A validated, immutable sequence of samples for one playback session
///
/// Construction checks everything the pipeline depends on, so nothing
/// downstream has to fail after drawing has begun.
#[derive(Debug, Clone)]
pub struct SampleSeries {
    samples: Vec<TelemetrySample>,
}

impl SampleSeries {
    /// Validate raw samples into a series
    ///
    /// Checks, in order: at least two samples, every channel finite,
    /// elapsed time never decreasing, and at least two distinct positions.
    pub fn new(samples: Vec<TelemetrySample>) -> ReplayResult<Self> {
        if samples.len() < 2 {
            return Err(ReplayError::invalid_input(format!(
                "need at least 2 samples, got {}",
                samples.len()
            )));
        }

        let series = Self { samples };
        ensure_finite("x", &series.x())?;
        ensure_finite("y", &series.y())?;
        ensure_finite("speed", &series.speed())?;
        ensure_finite("elapsed time", &series.elapsed_time())?;

        for (idx, pair) in series.samples.windows(2).enumerate() {
            if pair[1].elapsed_time < pair[0].elapsed_time {
                return Err(ReplayError::NonMonotonicTime {
                    index: idx + 1,
                    previous: pair[0].elapsed_time,
                    current: pair[1].elapsed_time,
                });
            }
        }

        let first = series.samples[0];
        if series
            .samples
            .iter()
            .all(|s| s.x == first.x && s.y == first.y)
        {
            return Err(ReplayError::DegenerateTrack);
        }

        Ok(series)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed series
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn x(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.x).collect()
    }

    pub fn y(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.y).collect()
    }

    pub fn speed(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.speed).collect()
    }

    pub fn elapsed_time(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.elapsed_time).collect()
    }

    /// Lap duration in seconds (last minus first elapsed time)
    pub fn duration(&self) -> f64 {
        self.samples[self.samples.len() - 1].elapsed_time - self.samples[0].elapsed_time
    }
}
