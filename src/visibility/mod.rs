//! Visibility polygon construction for regions with holes.
//!
//! [`VisibilityBuilder`] computes the visibility polygon (the set of
//! points with an unobstructed straight line to an observer) inside a
//! polygonal [`Region`](crate::polygon::Region) whose holes genuinely
//! occlude.
//!
//! The algorithm is an angular sweep over the region's vertices: for each
//! vertex direction it gathers every vertex collinear with the ray, clips
//! the ray against the nearest non-incident boundary edge, walks the
//! survivors near to far until the boundary has crossed both sides of the
//! ray, and finally stitches the per-direction extents back into one
//! closed loop in angle order. Work is O(V²) in the region's vertex
//! count, which is fine for interactive use at tens to hundreds of
//! vertices.
//!
//! # Example
//!
//! ```
//! use sightline::{Point2, Polygon, Region, VisibilityBuilder};
//!
//! let room = Region::from_boundary(Polygon::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ]));
//!
//! let mut builder = VisibilityBuilder::new();
//! builder.set_region(&room);
//!
//! // From the center of a convex room, everything is visible.
//! let visible = builder.build(Point2::new(5.0, 5.0)).unwrap();
//! assert_eq!(visible.len(), 4);
//! ```

mod ray_map;

use crate::error::SightlineError;
use crate::polygon::{Polygon, Region};
use crate::primitives::{Point2, Ray2, Segment2};
use num_traits::Float;
use ray_map::{FarHit, RayHit, RayMap, VisibilityRay};
use std::cmp::Ordering;

// Sides of a sweep ray the boundary touches at a candidate, as a bitmask.
// Once the accumulated mask covers both sides, the line of sight ends.
const SIDE_NONE: u8 = 0;
const SIDE_LEFT: u8 = 1;
const SIDE_RIGHT: u8 = 2;
const SIDE_BOTH: u8 = SIDE_LEFT | SIDE_RIGHT;

/// One vertex of the flattened boundary ring.
///
/// `prev` and `next` stay within the vertex's own loop, wrapping around.
#[derive(Debug, Clone, Copy)]
struct RingVertex<F> {
    point: Point2<F>,
    prev: usize,
    next: usize,
}

/// A point found to lie on the current sweep ray.
#[derive(Debug, Clone, Copy)]
struct RayCandidate<F> {
    hit: RayHit,
    point: Point2<F>,
    dist_sq: F,
}

/// Builds visibility polygons for a polygonal region with holes.
///
/// The builder owns its region snapshot and scratch buffers, which are
/// reused (not reallocated) across [`build`](VisibilityBuilder::build)
/// calls. It is not meant to be shared between threads; give each thread
/// its own builder with its own region snapshot.
pub struct VisibilityBuilder<F> {
    verts: Vec<RingVertex<F>>,
    rays: RayMap<F>,
    processed: Vec<bool>,
    candidates: Vec<RayCandidate<F>>,
    epsilon: F,
}

impl<F: Float> VisibilityBuilder<F> {
    /// Creates a builder with the default tolerance.
    ///
    /// The default is `F::epsilon().sqrt()`, compared against *squared*
    /// distances for the "on the ray" and "at the observer" tests. For
    /// very large or very small coordinates, set a scene-appropriate
    /// value with [`with_epsilon`](VisibilityBuilder::with_epsilon) or
    /// [`set_epsilon`](VisibilityBuilder::set_epsilon).
    pub fn new() -> Self {
        Self::with_epsilon(F::epsilon().sqrt())
    }

    /// Creates a builder with an explicit tolerance.
    pub fn with_epsilon(epsilon: F) -> Self {
        Self {
            verts: Vec::new(),
            rays: RayMap::new(),
            processed: Vec::new(),
            candidates: Vec::new(),
            epsilon,
        }
    }

    /// Replaces the tolerance used by subsequent builds.
    pub fn set_epsilon(&mut self, epsilon: F) {
        self.epsilon = epsilon;
    }

    /// Replaces the region the builder sweeps.
    ///
    /// The first loop is the outer boundary, any further loops are holes.
    /// Each loop should have at least three points; loops must not overlap
    /// or self-intersect. Ill-formed input is not validated and produces
    /// an unspecified (but non-crashing) result.
    pub fn set_region(&mut self, region: &Region<F>) {
        self.verts.clear();
        for polygon in &region.loops {
            let base = self.verts.len();
            let n = polygon.vertices.len();
            for (i, &point) in polygon.vertices.iter().enumerate() {
                self.verts.push(RingVertex {
                    point,
                    next: base + (i + 1) % n,
                    prev: base + (i + n - 1) % n,
                });
            }
        }

        self.processed.clear();
        self.processed.resize(self.verts.len(), false);
        // One extra slot for the boundary-clip point.
        self.candidates.clear();
        self.candidates.reserve(self.verts.len() + 1);
    }

    /// Computes the visibility polygon seen from `source`.
    ///
    /// Returns [`SightlineError::EmptyRegion`] if no region has been set
    /// and [`SightlineError::DegenerateOutput`] if fewer than three ray
    /// directions survive the sweep (for example when the observer sits
    /// exactly on a boundary vertex). The output winding is whatever the
    /// angular stitch order produces; it is not normalized.
    pub fn build(&mut self, source: Point2<F>) -> Result<Polygon<F>, SightlineError> {
        if self.verts.is_empty() {
            return Err(SightlineError::EmptyRegion);
        }

        self.rays.clear();
        for flag in self.processed.iter_mut() {
            *flag = false;
        }

        for seed in 0..self.verts.len() {
            if self.processed[seed] {
                continue;
            }
            self.processed[seed] = true;

            let seed_point = self.verts[seed].point;
            let to_seed = seed_point - source;
            let len_sq = to_seed.magnitude_squared();
            if len_sq <= self.epsilon {
                // The observer sits on this vertex; it defines no direction.
                continue;
            }

            let dir = to_seed / len_sq.sqrt();
            let ray = Ray2::new(source, dir);

            self.candidates.clear();
            self.candidates.push(RayCandidate {
                hit: RayHit::Vertex(seed),
                point: seed_point,
                dist_sq: len_sq,
            });

            // Every index below the seed is already processed, so the
            // scan picks up just past it.
            self.collect_collinear(&ray, seed + 1);

            // Near-to-far order along the ray.
            self.candidates.sort_unstable_by(|a, b| {
                a.dist_sq.partial_cmp(&b.dist_sq).unwrap_or(Ordering::Equal)
            });

            self.clip_against_boundary(&ray);
            if self.candidates.is_empty() {
                // The nearest boundary edge cuts in front of every
                // collinear vertex; nothing on this ray is visible.
                continue;
            }

            // Walk outward accumulating which sides of the ray the
            // boundary touches at each candidate. The extent ends at the
            // first candidate where both sides are covered.
            let mut side = SIDE_NONE;
            let mut visible = self.candidates.len();
            for (i, candidate) in self.candidates.iter().enumerate() {
                side |= self.side_at(candidate.hit, &ray);
                if side == SIDE_BOTH {
                    visible = i + 1;
                    break;
                }
            }
            self.candidates.truncate(visible);

            let near = self.candidates[0];
            let near_id = match near.hit {
                RayHit::Vertex(id) => id,
                // The clip step appends an edge hit only behind at least
                // one surviving vertex, so the nearest candidate is
                // always a vertex.
                RayHit::Edge(..) => continue,
            };

            let far = if self.candidates.len() > 1 {
                let last = self.candidates[self.candidates.len() - 1];
                Some(FarHit {
                    hit: last.hit,
                    point: last.point,
                })
            } else {
                None
            };

            let angle = dir.y.atan2(dir.x);
            self.rays
                .insert(angle, near.dist_sq, VisibilityRay { near: near_id, far });
        }

        self.stitch()
    }

    /// Collects every unprocessed vertex from `from` onward that lies on
    /// the forward ray, marking each as processed.
    fn collect_collinear(&mut self, ray: &Ray2<F>, from: usize) {
        for index in from..self.verts.len() {
            if self.processed[index] {
                continue;
            }

            let point = self.verts[index].point;
            let (closest, t) = ray.closest_point_to(point);
            if t <= F::zero() {
                // Projects onto or behind the observer; if it defines a
                // direction of its own, its own sweep iteration gets it.
                continue;
            }
            if closest.distance_squared(point) > self.epsilon {
                continue;
            }

            self.processed[index] = true;
            self.candidates.push(RayCandidate {
                hit: RayHit::Vertex(index),
                point,
                dist_sq: point.distance_squared(ray.origin),
            });
        }
    }

    /// Clips the sorted candidate list against the nearest boundary edge
    /// crossed by the ray.
    ///
    /// Edges incident to a collected candidate are not occluders for this
    /// ray and are skipped. Candidates at or beyond the intersection are
    /// culled; if any survive, the intersection itself joins the list as
    /// the final, farthest candidate.
    fn clip_against_boundary(&mut self, ray: &Ray2<F>) {
        let Some((point, edge)) = self.closest_boundary_intersect(ray) else {
            return;
        };

        let back_dist_sq = point.distance_squared(ray.origin);
        if let Some(first_cut) = self
            .candidates
            .iter()
            .position(|c| back_dist_sq < c.dist_sq)
        {
            self.candidates.truncate(first_cut);
        }

        if !self.candidates.is_empty() {
            self.candidates.push(RayCandidate {
                hit: edge,
                point,
                dist_sq: back_dist_sq,
            });
        }
    }

    /// Finds the nearest intersection of the ray with a boundary edge not
    /// incident to any collected candidate.
    fn closest_boundary_intersect(&self, ray: &Ray2<F>) -> Option<(Point2<F>, RayHit)> {
        let mut best_t = F::infinity();
        let mut best = None;

        for (index, vert) in self.verts.iter().enumerate() {
            if self.candidates_contain(RayHit::Vertex(index))
                || self.candidates_contain(RayHit::Vertex(vert.next))
            {
                continue;
            }

            let edge = Segment2::new(vert.point, self.verts[vert.next].point);
            let Some((point, t_ray, _)) = ray.intersect_segment(&edge) else {
                continue;
            };

            if t_ray < best_t {
                best_t = t_ray;
                best = Some((point, RayHit::edge(index, vert.next)));
            }
        }

        best
    }

    fn candidates_contain(&self, hit: RayHit) -> bool {
        self.candidates.iter().any(|c| c.hit == hit)
    }

    /// Classifies which side(s) of the ray the boundary occupies at a
    /// candidate.
    ///
    /// An edge intersection is a crossing point by construction, so it
    /// covers both sides. For a vertex, each of its two incident edges
    /// contributes the side its far endpoint falls on.
    fn side_at(&self, hit: RayHit, ray: &Ray2<F>) -> u8 {
        let id = match hit {
            RayHit::Edge(..) => return SIDE_BOTH,
            RayHit::Vertex(id) => id,
        };

        let vert = &self.verts[id];
        let to_next = self.verts[vert.next].point - ray.origin;
        let to_prev = self.verts[vert.prev].point - ray.origin;

        let next_perp = ray.direction.perp_dot(to_next);
        let prev_perp = ray.direction.perp_dot(to_prev);

        let mut side = SIDE_NONE;
        if next_perp > self.epsilon {
            side |= SIDE_LEFT;
        } else if next_perp < -self.epsilon {
            side |= SIDE_RIGHT;
        }
        if prev_perp > self.epsilon {
            side |= SIDE_LEFT;
        } else if prev_perp < -self.epsilon {
            side |= SIDE_RIGHT;
        }

        side
    }

    /// True if `id` shares a boundary edge with either end of `ray`.
    ///
    /// Pure ring lookup; no floating-point comparisons.
    fn is_connected(&self, id: usize, ray: &VisibilityRay<F>) -> bool {
        let near = &self.verts[ray.near];
        if near.next == id || near.prev == id {
            return true;
        }

        match ray.far {
            None => false,
            Some(FarHit {
                hit: RayHit::Edge(a, b),
                ..
            }) => a == id || b == id,
            Some(FarHit {
                hit: RayHit::Vertex(v),
                ..
            }) => {
                let vert = &self.verts[v];
                vert.next == id || vert.prev == id
            }
        }
    }

    /// Walks the ray map in ascending angle order (wrapping) and emits
    /// the output loop.
    ///
    /// A ray whose near vertex is connected to the previous ray emits
    /// near point first; otherwise the pair is reversed so consecutive
    /// output segments keep tracing the region boundary's local winding
    /// instead of crossing it.
    fn stitch(&self) -> Result<Polygon<F>, SightlineError> {
        let count = self.rays.len();
        if count < 3 {
            return Err(SightlineError::DegenerateOutput { rays: count });
        }

        let mut points = Vec::with_capacity(count * 2);
        for i in 0..count {
            let prev = self.rays.get(i);
            let ray = self.rays.get((i + 1) % count);
            let near_point = self.verts[ray.near].point;

            match ray.far {
                None => points.push(near_point),
                Some(far) => {
                    if self.is_connected(ray.near, prev) {
                        points.push(near_point);
                        points.push(far.point);
                    } else {
                        points.push(far.point);
                        points.push(near_point);
                    }
                }
            }
        }

        Ok(Polygon::new(points))
    }
}

impl<F: Float> Default for VisibilityBuilder<F> {
    fn default() -> Self {
        Self::new()
    }
}
