use tracing::{debug, info};

use crate::core::geometry::{Bounds, Point};
use crate::render::canvas::Canvas;

/// Canvas that reports draw calls through `tracing`
///
/// Used by the command-line host, where there is no window to draw into.
/// Static calls log at `info`, per-frame calls at `debug`.
#[derive(Debug, Default)]
pub struct LogCanvas {
    frame: usize,
}

impl LogCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for LogCanvas {
    fn set_axis_bounds(&mut self, bounds: Bounds) {
        info!(
            "Axis bounds: x=[{:.1}, {:.1}] y=[{:.1}, {:.1}]",
            bounds.min_x, bounds.max_x, bounds.min_y, bounds.max_y
        );
    }

    fn set_title(&mut self, title: &str) {
        info!("{}", title);
    }

    fn set_legend(&mut self, entries: &[String]) {
        info!("Legend: {}", entries.join(" | "));
    }

    fn draw_static_path(&mut self, points: &[Point]) {
        info!("Track outline: {} points", points.len());
    }

    fn set_moving_point(&mut self, x: f64, y: f64) {
        debug!("Frame {}: x = {:.2}, y = {:.2}", self.frame, x, y);
        self.frame += 1;
    }

    fn set_speed_label(&mut self, text: &str) {
        debug!("{}", text);
    }
}
