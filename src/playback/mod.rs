pub mod driver;
pub mod engine;

pub use driver::{cancel_on, drive, DriveSummary};
pub use engine::PlaybackEngine;

use std::time::Duration;

/// Slowest and fastest allowed playback speed
pub const MIN_PLAYBACK_SPEED: f64 = 0.1;
pub const MAX_PLAYBACK_SPEED: f64 = 10.0;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing drawn yet
    Idle,
    /// Frames remain to be drawn
    Running,
    /// Every frame has been drawn; terminal
    Finished,
}

/// What the host should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Wait this long, then tick again
    Wait(Duration),
    /// Playback is over; stop ticking
    Finished,
}

/// Playback configuration
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    pub speed: f64, // 1.0 = real-time, 2.0 = 2x speed
    pub speed_unit: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            speed_unit: "km/h".to_string(),
        }
    }
}

impl PlaybackConfig {
    /// Playback speed clamped to the supported range
    pub fn clamped_speed(&self) -> f64 {
        if self.speed.is_finite() {
            self.speed.clamp(MIN_PLAYBACK_SPEED, MAX_PLAYBACK_SPEED)
        } else {
            1.0
        }
    }
}
