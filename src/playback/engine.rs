use std::time::Duration;

use tracing::{debug, info, trace};

use crate::core::session::SessionInfo;
use crate::playback::{PlaybackConfig, PlaybackState, TickOutcome};
use crate::render::canvas::{speed_label, Canvas};
use crate::resample::PreparedLap;

/// Variable-rate playback of a prepared lap
///
/// Owns the only mutable playback state, the frame cursor. Each call to
/// [`tick`](Self::tick) draws one frame and reports how long the host
/// should wait before the next call. A finished engine stays finished;
/// replaying means building a new one.
pub struct PlaybackEngine {
    lap: PreparedLap,
    info: SessionInfo,
    config: PlaybackConfig,
    state: PlaybackState,
    frame_index: usize,
}

impl PlaybackEngine {
    pub fn new(lap: PreparedLap, info: SessionInfo, config: PlaybackConfig) -> Self {
        Self {
            lap,
            info,
            config,
            state: PlaybackState::Idle,
            frame_index: 0,
        }
    }

    /// Get current playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Index of the next frame to draw
    pub fn position(&self) -> usize {
        self.frame_index
    }

    /// Get total number of frames
    pub fn total_frames(&self) -> usize {
        self.lap.frames.len()
    }

    /// Frames not yet drawn
    pub fn remaining(&self) -> usize {
        self.total_frames() - self.frame_index
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// Get current playback speed
    pub fn speed(&self) -> f64 {
        self.config.clamped_speed()
    }

    pub fn session(&self) -> &SessionInfo {
        &self.info
    }

    pub fn lap(&self) -> &PreparedLap {
        &self.lap
    }

    /// Lap time of the most recently drawn frame, relative to lap start
    pub fn elapsed_lap_time(&self) -> Option<f64> {
        let drawn = self.frame_index.checked_sub(1)?;
        let times = self.lap.frames.elapsed_time();
        Some(times[drawn] - times[0])
    }

    /// Advance playback by one frame
    ///
    /// The first tick draws the static scene and frame 0 with no delay
    /// before it. Every wait reported afterwards is the delay of the frame
    /// about to be drawn. Once the last frame is drawn the engine reports
    /// `Finished` and further ticks draw nothing.
    pub fn tick<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> TickOutcome {
        match self.state {
            PlaybackState::Finished => return TickOutcome::Finished,
            PlaybackState::Idle => {
                self.draw_static(canvas);
                self.state = PlaybackState::Running;
                info!(
                    "Starting playback: {} frames at {:.1}x",
                    self.total_frames(),
                    self.speed()
                );
            }
            PlaybackState::Running => {}
        }

        let frame = match self.lap.frames.frame(self.frame_index) {
            Some(frame) => frame,
            None => return self.finish(),
        };

        canvas.set_moving_point(frame.position.x, frame.position.y);
        canvas.set_speed_label(&speed_label(frame.speed, &self.config.speed_unit));
        trace!(
            "Frame {}: x = {}, y = {}",
            self.frame_index,
            frame.position.x,
            frame.position.y
        );

        self.frame_index += 1;
        if self.frame_index >= self.total_frames() {
            return self.finish();
        }

        match self.next_delay() {
            Some(delay) => TickOutcome::Wait(delay),
            None => self.finish(),
        }
    }

    fn draw_static<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.set_axis_bounds(self.lap.bounds);
        canvas.set_title(&self.info.title());
        canvas.set_legend(&self.info.legend());
        canvas.draw_static_path(self.lap.frames.points());
    }

    /// Wall-clock wait before drawing the frame at the cursor
    fn next_delay(&self) -> Option<Duration> {
        self.lap.schedule.duration_at(self.frame_index, self.speed())
    }

    fn finish(&mut self) -> TickOutcome {
        if self.state != PlaybackState::Finished {
            self.state = PlaybackState::Finished;
            debug!("Playback finished after {} frames", self.frame_index);
        }
        TickOutcome::Finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Point;
    use crate::core::sample::TelemetrySample;
    use crate::render::recording::{DrawCommand, RecordingCanvas};
    use crate::resample::MILLIS_PER_SECOND;

    fn engine(factor: usize) -> PlaybackEngine {
        let samples = vec![
            TelemetrySample::new(0.0, 0.0, 100.0, 0.0),
            TelemetrySample::new(1.0, 0.0, 150.0, 0.5),
            TelemetrySample::new(2.0, 0.0, 200.0, 1.0),
        ];
        let lap = PreparedLap::from_samples(samples, factor, MILLIS_PER_SECOND).unwrap();
        let info = SessionInfo {
            event_name: "Test Ring".to_string(),
            date: None,
            driver: "Tester".to_string(),
        };
        PlaybackEngine::new(lap, info, PlaybackConfig::default())
    }

    fn is_static(cmd: &DrawCommand) -> bool {
        matches!(
            cmd,
            DrawCommand::AxisBounds(_)
                | DrawCommand::Title(_)
                | DrawCommand::Legend(_)
                | DrawCommand::StaticPath(_)
        )
    }

    #[test]
    fn test_starts_idle() {
        let engine = engine(10);
        assert_eq!(engine.state(), PlaybackState::Idle);
        assert_eq!(engine.position(), 0);
        assert_eq!(engine.remaining(), 30);
        assert_eq!(engine.elapsed_lap_time(), None);
    }

    #[test]
    fn test_first_tick_draws_static_scene_and_frame_zero() {
        let mut engine = engine(10);
        let mut canvas = RecordingCanvas::new();

        let outcome = engine.tick(&mut canvas);

        assert_eq!(engine.state(), PlaybackState::Running);
        assert_eq!(engine.position(), 1);
        assert_eq!(canvas.count(is_static), 4);
        assert_eq!(canvas.moving_points(), vec![Point::new(0.0, 0.0)]);
        assert_eq!(canvas.speed_labels(), vec!["Speed: 100 km/h"]);
        assert_eq!(
            canvas.commands()[1],
            DrawCommand::Title("Tester - Test Ring Lap Replay".to_string())
        );

        // Wait before frame 1 uses frame 1's delay
        let expected = engine.lap().schedule.duration(1).unwrap();
        assert_eq!(outcome, TickOutcome::Wait(expected));
    }

    #[test]
    fn test_exactly_frame_count_ticks_until_finished() {
        let mut engine = engine(10);
        let mut canvas = RecordingCanvas::new();

        let mut ticks = 0;
        loop {
            ticks += 1;
            if engine.tick(&mut canvas) == TickOutcome::Finished {
                break;
            }
        }

        assert_eq!(ticks, 30);
        assert!(engine.is_finished());
        assert_eq!(engine.position(), 30);
        assert_eq!(engine.remaining(), 0);
        assert_eq!(canvas.moving_points().len(), 30);
        assert_eq!(canvas.speed_labels().len(), 30);
        assert_eq!(canvas.count(is_static), 4);
        assert_eq!(engine.elapsed_lap_time(), Some(1.0));
    }

    #[test]
    fn test_finished_is_terminal() {
        let mut engine = engine(1);
        let mut canvas = RecordingCanvas::new();
        while engine.tick(&mut canvas) != TickOutcome::Finished {}

        let drawn = canvas.commands().len();
        for _ in 0..5 {
            assert_eq!(engine.tick(&mut canvas), TickOutcome::Finished);
        }
        assert_eq!(canvas.commands().len(), drawn);
        assert_eq!(engine.state(), PlaybackState::Finished);
    }

    #[test]
    fn test_frames_drawn_in_order() {
        let mut engine = engine(10);
        let mut canvas = RecordingCanvas::new();
        while engine.tick(&mut canvas) != TickOutcome::Finished {}

        let expected: Vec<Point> = engine.lap().frames.points().to_vec();
        assert_eq!(canvas.moving_points(), expected);
        assert!(canvas
            .moving_points()
            .windows(2)
            .all(|w| w[1].x >= w[0].x));
    }

    #[test]
    fn test_speed_multiplier_shortens_waits() {
        let mut normal = engine(10);
        let mut fast = engine(10);
        fast.config.speed = 2.0;
        let mut canvas = RecordingCanvas::new();

        let (TickOutcome::Wait(a), TickOutcome::Wait(b)) =
            (normal.tick(&mut canvas), fast.tick(&mut canvas))
        else {
            panic!("expected waits");
        };
        let ratio = a.as_secs_f64() / b.as_secs_f64();
        assert!((ratio - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut engine = engine(1);
        engine.config.speed = 50.0;
        assert_eq!(engine.speed(), 10.0);
        engine.config.speed = 0.0;
        assert_eq!(engine.speed(), 0.1);
    }
}
