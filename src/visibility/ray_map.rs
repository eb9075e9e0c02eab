//! Angle-ordered storage for resolved visibility rays.

use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// Identity of a point hit by a sweep ray: either a boundary vertex, or a
/// point along a boundary edge that is not itself a vertex.
///
/// Edge endpoints are stored lower index first, so the same edge compares
/// equal regardless of traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayHit {
    /// A boundary vertex, by ring index.
    Vertex(usize),
    /// An intersection with the edge between two ring-adjacent vertices.
    Edge(usize, usize),
}

impl RayHit {
    /// Creates an edge hit with canonical endpoint ordering.
    #[inline]
    pub fn edge(a: usize, b: usize) -> Self {
        if a <= b {
            RayHit::Edge(a, b)
        } else {
            RayHit::Edge(b, a)
        }
    }
}

/// The far endpoint of a visibility ray.
///
/// The position is carried alongside the identity because an edge hit has
/// no vertex to look the position up from.
#[derive(Debug, Clone, Copy)]
pub struct FarHit<F> {
    pub hit: RayHit,
    pub point: Point2<F>,
}

/// One resolved ray of the sweep: the nearest visible vertex and,
/// optionally, the farthest visible point along the same direction.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityRay<F> {
    /// Ring index of the nearest point on the ray; always a real vertex.
    pub near: usize,
    /// The farthest visible point, if more than one point survived.
    pub far: Option<FarHit<F>>,
}

struct RayEntry<F> {
    angle: F,
    near_dist_sq: F,
    ray: VisibilityRay<F>,
}

/// Rays keyed by their angle from the observer, in ascending order.
///
/// Backed by a sorted vector with binary-search insertion; ascending
/// iteration order (with wraparound at the caller) is the property the
/// stitching step depends on. When two rays resolve to exactly the same
/// angle, the one whose near vertex is closer to the observer wins,
/// deterministically, rather than whichever happened to insert last.
pub struct RayMap<F> {
    entries: Vec<RayEntry<F>>,
}

impl<F: Float> RayMap<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Inserts a ray keyed by `angle`.
    ///
    /// `near_dist_sq` is the squared distance from the observer to the
    /// ray's near vertex; it only matters for duplicate-angle resolution.
    pub fn insert(&mut self, angle: F, near_dist_sq: F, ray: VisibilityRay<F>) {
        let entry = RayEntry {
            angle,
            near_dist_sq,
            ray,
        };
        let search = self
            .entries
            .binary_search_by(|e| e.angle.partial_cmp(&angle).unwrap_or(Ordering::Less));
        match search {
            Ok(i) => {
                if near_dist_sq < self.entries[i].near_dist_sq {
                    self.entries[i] = entry;
                }
            }
            Err(i) => self.entries.insert(i, entry),
        }
    }

    /// Returns the ray at position `index` in ascending-angle order.
    pub fn get(&self, index: usize) -> &VisibilityRay<F> {
        &self.entries[index].ray
    }
}
