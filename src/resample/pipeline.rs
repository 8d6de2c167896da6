use tracing::debug;

use crate::core::error::{ReplayError, ReplayResult};
use crate::core::geometry::{Bounds, Point};
use crate::core::sample::{SampleSeries, TelemetrySample};
use crate::playback::MIN_PLAYBACK_SPEED;
use crate::resample::channel::resample_channel;
use crate::resample::schedule::FrameSchedule;
use crate::resample::spline::smooth_path;

/// One displayable frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub position: Point,
    pub speed: f64,
    pub elapsed_time: f64,
}

/// Index-aligned position, speed and time channels after upsampling
#[derive(Debug, Clone)]
pub struct ResampledSeries {
    points: Vec<Point>,
    speed: Vec<f64>,
    elapsed_time: Vec<f64>,
}

impl ResampledSeries {
    /// Smooth the path and bring speed and time to the same frame count
    pub fn from_series(series: &SampleSeries, upsample_factor: usize) -> ReplayResult<Self> {
        let points = smooth_path(&series.x(), &series.y(), upsample_factor)?;
        let frame_count = points.len();

        let speed = resample_channel(&series.speed(), frame_count)?;
        let elapsed_time = resample_channel(&series.elapsed_time(), frame_count)?;

        debug!(
            "Resampled {} samples to {} frames (factor {})",
            series.len(),
            frame_count,
            upsample_factor
        );

        Ok(Self {
            points,
            speed,
            elapsed_time,
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn speed(&self) -> &[f64] {
        &self.speed
    }

    pub fn elapsed_time(&self) -> &[f64] {
        &self.elapsed_time
    }

    pub fn frame(&self, index: usize) -> Option<Frame> {
        Some(Frame {
            position: *self.points.get(index)?,
            speed: *self.speed.get(index)?,
            elapsed_time: *self.elapsed_time.get(index)?,
        })
    }
}

/// Everything a playback session reads: frames, their delays, and the
/// axis bounds of the displayed path
#[derive(Debug, Clone)]
pub struct PreparedLap {
    pub frames: ResampledSeries,
    pub schedule: FrameSchedule,
    pub bounds: Bounds,
}

impl PreparedLap {
    /// Run the full pipeline on a validated series
    pub fn from_series(
        series: &SampleSeries,
        upsample_factor: usize,
        unit_scale: f64,
    ) -> ReplayResult<Self> {
        if upsample_factor == 0 {
            return Err(ReplayError::invalid_input("upsample factor must be at least 1"));
        }

        let frames = ResampledSeries::from_series(series, upsample_factor)?;
        let schedule = FrameSchedule::from_times(frames.elapsed_time(), unit_scale)?;
        // Every delay must stay representable even at the slowest playback speed
        if let Some(idx) = schedule.first_unrepresentable(MIN_PLAYBACK_SPEED) {
            return Err(ReplayError::invalid_input(format!(
                "frame {} delay of {} is too long to schedule",
                idx,
                schedule.delays()[idx]
            )));
        }
        let bounds = Bounds::from_points(frames.points())?;

        debug!(
            "Prepared lap: {} frames, {:.1} schedule units, bounds x=[{:.1}, {:.1}] y=[{:.1}, {:.1}]",
            frames.len(),
            schedule.total(),
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y
        );

        Ok(Self {
            frames,
            schedule,
            bounds,
        })
    }

    /// Validate raw samples and run the pipeline
    ///
    /// All data errors surface here, before any drawing happens.
    pub fn from_samples(
        samples: Vec<TelemetrySample>,
        upsample_factor: usize,
        unit_scale: f64,
    ) -> ReplayResult<Self> {
        let series = SampleSeries::new(samples)?;
        Self::from_series(&series, upsample_factor, unit_scale)
    }
}
