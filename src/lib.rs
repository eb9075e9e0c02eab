//! sightline - 2D visibility polygons
//!
//! Given a polygonal region (an outer boundary plus any number of holes)
//! and an observer point, compute the visibility polygon: every point
//! with an unobstructed straight line to the observer. Holes occlude for
//! real; the result hugs their near sides and drops what lies behind.
//!
//! Everything is generic over `f32`/`f64` and uses plain floating-point
//! arithmetic with a configurable tolerance; exact predicates are out of
//! scope.

pub mod error;
pub mod polygon;
pub mod primitives;
pub mod visibility;

pub use error::SightlineError;
pub use polygon::{Polygon, Region};
pub use primitives::{Point2, Ray2, Segment2, Vec2};
pub use visibility::VisibilityBuilder;
