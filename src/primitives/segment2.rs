//! 2D line segment type.

use super::{Point2, Vec2};
use num_traits::Float;

/// A 2D line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2<F> {
    pub start: Point2<F>,
    pub end: Point2<F>,
}

impl<F: Float> Segment2<F> {
    /// Creates a new segment from two points.
    #[inline]
    pub fn new(start: Point2<F>, end: Point2<F>) -> Self {
        Self { start, end }
    }

    /// Returns the direction vector from start to end (not normalized).
    #[inline]
    pub fn direction(self) -> Vec2<F> {
        self.end - self.start
    }

    /// Returns the squared length of the segment.
    #[inline]
    pub fn length_squared(self) -> F {
        self.start.distance_squared(self.end)
    }

    /// Returns the length of the segment.
    #[inline]
    pub fn length(self) -> F {
        self.start.distance(self.end)
    }

    /// Returns the point at parameter `t` along the segment.
    ///
    /// `t = 0` returns `start`, `t = 1` returns `end`; values outside
    /// `[0, 1]` extrapolate beyond the endpoints.
    #[inline]
    pub fn point_at(self, t: F) -> Point2<F> {
        self.start + self.direction() * t
    }
}

impl<F: Float> From<(Point2<F>, Point2<F>)> for Segment2<F> {
    fn from((start, end): (Point2<F>, Point2<F>)) -> Self {
        Self::new(start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_and_length() {
        let seg: Segment2<f64> = Segment2::new(Point2::new(1.0, 1.0), Point2::new(4.0, 5.0));
        assert_eq!(seg.direction(), Vec2::new(3.0, 4.0));
        assert_eq!(seg.length_squared(), 25.0);
        assert_eq!(seg.length(), 5.0);
    }

    #[test]
    fn test_point_at() {
        let seg: Segment2<f64> = Segment2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        assert_eq!(seg.point_at(0.0), seg.start);
        assert_eq!(seg.point_at(1.0), seg.end);
        assert_eq!(seg.point_at(0.25), Point2::new(2.5, 0.0));
    }
}
