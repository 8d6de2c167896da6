use std::time::Duration;

use crate::core::error::{ReplayError, ReplayResult};

/// Seconds to milliseconds, the usual animation timer unit
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Per-frame display delays derived from a resampled time channel
///
/// `delays[i]` is how long frame `i` stays on screen before frame `i + 1`,
/// expressed in seconds times `unit_scale`. There is one entry per frame;
/// the last one repeats its predecessor because no later timestamp exists.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSchedule {
    delays: Vec<f64>,
    unit_scale: f64,
}

impl FrameSchedule {
    /// Build the schedule from a non-decreasing elapsed-time channel
    pub fn from_times(times: &[f64], unit_scale: f64) -> ReplayResult<Self> {
        if times.len() < 2 {
            return Err(ReplayError::invalid_input(format!(
                "frame schedule needs at least 2 timestamps, got {}",
                times.len()
            )));
        }
        if !unit_scale.is_finite() || unit_scale <= 0.0 {
            return Err(ReplayError::invalid_input(format!(
                "unit scale must be positive, got {}",
                unit_scale
            )));
        }

        let mut delays = Vec::with_capacity(times.len());
        for (idx, pair) in times.windows(2).enumerate() {
            let delta = pair[1] - pair[0];
            if !delta.is_finite() {
                return Err(ReplayError::invalid_input(format!(
                    "non-finite time step at frame {}",
                    idx
                )));
            }
            if delta < 0.0 {
                return Err(ReplayError::NonMonotonicTime {
                    index: idx + 1,
                    previous: pair[0],
                    current: pair[1],
                });
            }
            delays.push(delta * unit_scale);
        }

        // Pad: the last frame keeps the previous delay
        let last = delays[delays.len() - 1];
        delays.push(last);

        Ok(Self { delays, unit_scale })
    }

    pub fn len(&self) -> usize {
        self.delays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    pub fn delays(&self) -> &[f64] {
        &self.delays
    }

    pub fn unit_scale(&self) -> f64 {
        self.unit_scale
    }

    /// Delay for frame `index` in schedule units
    pub fn delay(&self, index: usize) -> Option<f64> {
        self.delays.get(index).copied()
    }

    /// Delay for frame `index` as wall-clock time
    pub fn duration(&self, index: usize) -> Option<Duration> {
        self.duration_at(index, 1.0)
    }

    /// Delay for frame `index` as wall-clock time at a playback speed
    ///
    /// `None` when the index is out of range or the delay does not fit in
    /// a `Duration`.
    pub fn duration_at(&self, index: usize, speed: f64) -> Option<Duration> {
        let secs = self.delay(index)? / self.unit_scale / speed;
        Duration::try_from_secs_f64(secs).ok()
    }

    /// First frame whose delay cannot be represented at `speed`
    pub fn first_unrepresentable(&self, speed: f64) -> Option<usize> {
        (0..self.delays.len()).find(|&i| self.duration_at(i, speed).is_none())
    }

    /// Sum of every real delay, excluding the padded last frame
    ///
    /// Equals the lap duration in schedule units up to rounding.
    pub fn total(&self) -> f64 {
        self.delays[..self.delays.len() - 1].iter().sum()
    }
}
