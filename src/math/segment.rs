use crate::error::{GeometryError, Result};

use super::{Point2, Vector2, TOLERANCE};

/// A directed 2D line segment between two path points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment2 {
    pub a: Point2,
    pub b: Point2,
}

impl LineSegment2 {
    /// Creates a segment running from `a` to `b`.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self { a, b }
    }

    /// Returns the Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.a, &self.b)
    }

    #[must_use]
    pub fn squared_length(&self) -> f64 {
        nalgebra::distance_squared(&self.a, &self.b)
    }

    /// Returns the unit vector pointing from `a` to `b`.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if both ends coincide.
    pub fn direction(&self) -> Result<Vector2> {
        let d = self.b - self.a;
        let len = d.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(d / len)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn length_3_4_5() {
        let seg = LineSegment2::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert_relative_eq!(seg.length(), 5.0);
        assert_relative_eq!(seg.squared_length(), 25.0);
    }

    #[test]
    fn direction_is_unit() {
        let seg = LineSegment2::new(Point2::new(1.0, 1.0), Point2::new(1.0, 5.0));
        let d = seg.direction().unwrap();
        assert_relative_eq!(d.x, 0.0);
        assert_relative_eq!(d.y, 1.0);
    }

    #[test]
    fn direction_of_zero_length_segment_fails() {
        let p = Point2::new(2.0, 2.0);
        let seg = LineSegment2::new(p, p);
        assert!(seg.direction().is_err());
    }
}
