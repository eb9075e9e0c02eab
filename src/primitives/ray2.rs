//! 2D ray type.

use super::{Point2, Segment2, Vec2};
use num_traits::Float;

/// A 2D ray defined by an origin point and a direction.
///
/// The ray extends infinitely from its origin in the direction specified.
/// The direction is stored as-is (not necessarily normalized).
///
/// # Example
///
/// ```
/// use sightline::primitives::{Point2, Ray2, Segment2, Vec2};
///
/// let ray: Ray2<f64> = Ray2::new(Point2::origin(), Vec2::new(1.0, 0.0));
/// let wall = Segment2::new(Point2::new(5.0, -1.0), Point2::new(5.0, 1.0));
///
/// let hit = ray.intersect_segment(&wall);
/// assert!(hit.is_some());
/// assert_eq!(hit.unwrap().0.x, 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2<F> {
    /// Origin point of the ray.
    pub origin: Point2<F>,
    /// Direction vector.
    pub direction: Vec2<F>,
}

impl<F: Float> Ray2<F> {
    /// Creates a new ray from origin and direction.
    #[inline]
    pub fn new(origin: Point2<F>, direction: Vec2<F>) -> Self {
        Self { origin, direction }
    }

    /// Returns the point along the ray at parameter `t`.
    #[inline]
    pub fn point_at(&self, t: F) -> Point2<F> {
        self.origin + self.direction * t
    }

    /// Returns the closest point on the ray to the given point, together
    /// with its ray parameter.
    ///
    /// The parameter is clamped to `>= 0`, so a returned `t` of exactly
    /// zero means the query point projects onto the origin or behind it,
    /// not onto the forward ray.
    pub fn closest_point_to(&self, point: Point2<F>) -> (Point2<F>, F) {
        let to_point = point - self.origin;
        let len_sq = self.direction.magnitude_squared();

        if len_sq < F::epsilon() {
            return (self.origin, F::zero());
        }

        let t = to_point.dot(self.direction) / len_sq;
        let t = t.max(F::zero());

        (self.point_at(t), t)
    }

    /// Returns the squared distance from the ray to the given point.
    #[inline]
    pub fn distance_squared_to(&self, point: Point2<F>) -> F {
        let (closest, _) = self.closest_point_to(point);
        point.distance_squared(closest)
    }

    /// Intersects this ray with a line segment.
    ///
    /// Returns `Some((point, t_ray, t_segment))` where `t_ray >= 0` is the
    /// parameter along the ray and `t_segment` lies in `[0, 1]`. Returns
    /// `None` if there is no intersection or the ray is parallel to the
    /// segment.
    pub fn intersect_segment(&self, segment: &Segment2<F>) -> Option<(Point2<F>, F, F)> {
        let seg_dir = segment.direction();

        let denom = self.direction.perp_dot(seg_dir);
        if denom.abs() < F::epsilon() {
            return None;
        }

        let delta = segment.start - self.origin;
        let t_ray = delta.perp_dot(seg_dir) / denom;
        let t_seg = delta.perp_dot(self.direction) / denom;

        if t_ray >= F::zero() && t_seg >= F::zero() && t_seg <= F::one() {
            Some((self.point_at(t_ray), t_ray, t_seg))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closest_point_ahead() {
        let ray: Ray2<f64> = Ray2::new(Point2::origin(), Vec2::new(1.0, 0.0));

        let (closest, t) = ray.closest_point_to(Point2::new(5.0, 3.0));
        assert_relative_eq!(closest.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(closest.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(t, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_closest_point_behind_clamps_to_origin() {
        let ray: Ray2<f64> = Ray2::new(Point2::origin(), Vec2::new(1.0, 0.0));

        let (closest, t) = ray.closest_point_to(Point2::new(-5.0, 3.0));
        assert_eq!(closest, Point2::origin());
        assert_eq!(t, 0.0);
    }

    #[test]
    fn test_distance_squared() {
        let ray: Ray2<f64> = Ray2::new(Point2::origin(), Vec2::new(1.0, 0.0));
        assert_relative_eq!(
            ray.distance_squared_to(Point2::new(5.0, 3.0)),
            9.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            ray.distance_squared_to(Point2::new(7.0, 0.0)),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_intersect_segment_hit() {
        let ray: Ray2<f64> = Ray2::new(Point2::origin(), Vec2::new(1.0, 0.0));
        let seg = Segment2::new(Point2::new(5.0, -2.0), Point2::new(5.0, 2.0));

        let (point, t_ray, t_seg) = ray.intersect_segment(&seg).unwrap();
        assert_relative_eq!(point.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(t_ray, 5.0, epsilon = 1e-12);
        assert_relative_eq!(t_seg, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_intersect_segment_miss() {
        let ray: Ray2<f64> = Ray2::new(Point2::origin(), Vec2::new(1.0, 0.0));

        // Behind the origin.
        let behind = Segment2::new(Point2::new(-5.0, -1.0), Point2::new(-5.0, 1.0));
        assert!(ray.intersect_segment(&behind).is_none());

        // Off to the side.
        let side = Segment2::new(Point2::new(5.0, 5.0), Point2::new(5.0, 10.0));
        assert!(ray.intersect_segment(&side).is_none());

        // Parallel.
        let parallel = Segment2::new(Point2::new(0.0, 1.0), Point2::new(10.0, 1.0));
        assert!(ray.intersect_segment(&parallel).is_none());
    }

    #[test]
    fn test_intersect_segment_at_origin() {
        // A segment passing through the ray origin intersects at t = 0.
        let ray: Ray2<f64> = Ray2::new(Point2::origin(), Vec2::new(1.0, 0.0));
        let through = Segment2::new(Point2::new(0.0, -1.0), Point2::new(0.0, 1.0));

        let (point, t_ray, _) = ray.intersect_segment(&through).unwrap();
        assert_eq!(point, Point2::origin());
        assert_eq!(t_ray, 0.0);
    }
}
