use serde::{Deserialize, Serialize};

use crate::core::error::{ReplayError, ReplayResult};

/// A point in track-local coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extent of a track path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Compute bounds over a set of points
    ///
    /// A path that collapses to a single point has no usable extent and is
    /// reported as a degenerate track. A straight line (zero extent on one
    /// axis only) is accepted.
    pub fn from_points(points: &[Point]) -> ReplayResult<Self> {
        let first = points
            .first()
            .ok_or_else(|| ReplayError::invalid_input("cannot bound an empty path"))?;

        let mut bounds = Self {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in &points[1..] {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_y = bounds.max_y.max(p.y);
        }

        if bounds.width() == 0.0 && bounds.height() == 0.0 {
            return Err(ReplayError::DegenerateTrack);
        }
        Ok(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points(&[
            Point::new(1.0, -2.0),
            Point::new(-3.0, 4.0),
            Point::new(0.5, 0.0),
        ])
        .unwrap();
        assert_eq!(bounds.min_x, -3.0);
        assert_eq!(bounds.max_x, 1.0);
        assert_eq!(bounds.min_y, -2.0);
        assert_eq!(bounds.max_y, 4.0);
    }

    #[test]
    fn test_straight_line_is_not_degenerate() {
        let bounds = Bounds::from_points(&[Point::new(0.0, 0.0), Point::new(2.0, 0.0)]).unwrap();
        assert_eq!(bounds.width(), 2.0);
        assert_eq!(bounds.height(), 0.0);
    }

    #[test]
    fn test_single_point_is_degenerate() {
        let err = Bounds::from_points(&[Point::new(1.0, 1.0), Point::new(1.0, 1.0)]).unwrap_err();
        assert_eq!(err, ReplayError::DegenerateTrack);
    }
}
