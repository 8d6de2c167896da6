use crate::core::geometry::{Bounds, Point};

/// Draw target for a playback session
///
/// Implementations own the actual rendering: a window, a terminal, or
/// an in-memory recorder for tests. The engine calls the static methods
/// once when a session starts and the per-frame methods once per tick.
pub trait Canvas {
    /// Set the visible extent of the track
    fn set_axis_bounds(&mut self, bounds: Bounds);

    /// Set the plot title
    fn set_title(&mut self, title: &str);

    /// Set static legend entries (driver, track, date)
    fn set_legend(&mut self, _entries: &[String]) {}

    /// Draw the static track outline
    fn draw_static_path(&mut self, points: &[Point]);

    /// Move the car marker
    fn set_moving_point(&mut self, x: f64, y: f64);

    /// Replace the speed readout text
    fn set_speed_label(&mut self, text: &str);
}

/// Format a speed readout: whole number followed by the unit
pub fn speed_label(speed: f64, unit: &str) -> String {
    format!("Speed: {:.0} {}", speed, unit)
}
