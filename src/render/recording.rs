use crate::core::geometry::{Bounds, Point};
use crate::render::canvas::Canvas;

/// A draw call captured by [`RecordingCanvas`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    AxisBounds(Bounds),
    Title(String),
    Legend(Vec<String>),
    StaticPath(Vec<Point>),
    MovingPoint(Point),
    SpeedLabel(String),
}

/// Canvas that records every call instead of drawing
///
/// Lets playback be checked frame by frame without a display.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands in call order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the canvas empty
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Positions of the moving point, in draw order
    pub fn moving_points(&self) -> Vec<Point> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::MovingPoint(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// Speed readouts, in draw order
    pub fn speed_labels(&self) -> Vec<String> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::SpeedLabel(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of commands matching a predicate
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl Canvas for RecordingCanvas {
    fn set_axis_bounds(&mut self, bounds: Bounds) {
        self.commands.push(DrawCommand::AxisBounds(bounds));
    }

    fn set_title(&mut self, title: &str) {
        self.commands.push(DrawCommand::Title(title.to_string()));
    }

    fn set_legend(&mut self, entries: &[String]) {
        self.commands.push(DrawCommand::Legend(entries.to_vec()));
    }

    fn draw_static_path(&mut self, points: &[Point]) {
        self.commands.push(DrawCommand::StaticPath(points.to_vec()));
    }

    fn set_moving_point(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MovingPoint(Point::new(x, y)));
    }

    fn set_speed_label(&mut self, text: &str) {
        self.commands.push(DrawCommand::SpeedLabel(text.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_title("Lap");
        canvas.set_moving_point(1.0, 2.0);
        canvas.set_speed_label("Speed: 10 km/h");
        canvas.set_moving_point(3.0, 4.0);

        assert_eq!(canvas.commands().len(), 4);
        assert_eq!(canvas.commands()[0], DrawCommand::Title("Lap".to_string()));
        assert_eq!(
            canvas.moving_points(),
            vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]
        );
        assert_eq!(canvas.speed_labels(), vec!["Speed: 10 km/h"]);
    }

    #[test]
    fn test_take_commands_clears() {
        let mut canvas = RecordingCanvas::new();
        canvas.set_legend(&["VER".to_string()]);
        let taken = canvas.take_commands();
        assert_eq!(taken.len(), 1);
        assert!(canvas.commands().is_empty());
    }
}
