//! Lap telemetry replay.
//!
//! Raw samples are validated into a [`SampleSeries`], the path is smoothed
//! with an interpolating quadratic spline, speed and time are resampled to
//! the same frame count, and a [`PlaybackEngine`] plays the frames back with
//! per-frame delays taken from the recorded timing.

pub mod config;
pub mod core;
pub mod input;
pub mod playback;
pub mod render;
pub mod resample;

pub use crate::config::ReplayConfig;
pub use crate::core::{
    Bounds, Point, ReplayError, ReplayResult, SampleSeries, SessionInfo, TelemetrySample,
};
pub use crate::input::{load_file, LapRecording, TelemetrySource};
pub use crate::playback::{
    cancel_on, drive, DriveSummary, PlaybackEngine, PlaybackState, TickOutcome,
};
pub use crate::render::{Canvas, LogCanvas, RecordingCanvas};
pub use crate::resample::{FrameSchedule, PreparedLap, ResampledSeries};

use tracing::info;

/// Validate a recording and set up a playback session for it
///
/// Every data error is reported here, before anything is drawn. A
/// recording without a driver name gets the configured one.
pub fn prepare_session(recording: LapRecording, config: &ReplayConfig) -> ReplayResult<PlaybackEngine> {
    config.validate()?;

    let LapRecording { mut info, samples } = recording;
    if info.driver == SessionInfo::default().driver {
        info.driver = config.driver_name.clone();
    }

    let series = SampleSeries::new(samples)?;
    let lap = PreparedLap::from_series(&series, config.upsample_factor, config.unit_scale)?;

    info!(
        "Prepared {} ({}): {} samples -> {} frames, lap time {:.3}s",
        info.event_name,
        info.date_label(),
        series.len(),
        lap.frames.len(),
        series.duration()
    );

    Ok(PlaybackEngine::new(lap, info, config.playback()))
}
