//! collision_core: 2D geometric primitives plus exact (narrow-phase) overlap
//! tests between them.
//!
//! Overlap is strict everywhere: boundary contact (shared AABB edge, circles
//! at distance exactly `r1 + r2`, a point exactly on a circle rim) does not
//! count as overlap. Every pairwise test is symmetric.

use glam::Vec2;
use smallvec::SmallVec;

pub mod narrow;
pub mod shapes;

pub use narrow::overlaps;
pub use shapes::{resolve, Pose, ShapeDesc};

/// Axis-aligned bounding box. `min`/`max` are kept normalized per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    #[inline]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    #[inline]
    pub fn from_center_half(center: Vec2, half: Vec2) -> Self {
        Self { min: center - half, max: center + half }
    }

    #[inline]
    pub fn expand(&self, pad: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(pad),
            max: self.max + Vec2::splat(pad),
        }
    }

    #[inline]
    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Strict interval overlap on both axes; shared edges do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Strict containment; points on the boundary are outside.
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

/// Closed vertex loop in world space. Assumed convex for the separating-axis
/// test; point containment uses the crossing test and tolerates any simple
/// polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: SmallVec<[Vec2; 8]>,
}

impl Polygon {
    pub fn from_points(points: impl IntoIterator<Item = Vec2>) -> Self {
        Self { points: points.into_iter().collect() }
    }

    pub fn bounds(&self) -> Aabb {
        let mut it = self.points.iter();
        let first = it.next().copied().unwrap_or(Vec2::ZERO);
        let mut bb = Aabb { min: first, max: first };
        for p in it {
            bb.min = bb.min.min(*p);
            bb.max = bb.max.max(*p);
        }
        bb
    }
}

/// A shape descriptor resolved against a pose: what the narrow phase tests.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimShape {
    Point(Vec2),
    Aabb(Aabb),
    Circle(Circle),
    Segment(Segment),
    Polygon(Polygon),
}

impl PrimShape {
    /// Conservative world-space bounds, used by the broad phase.
    pub fn bounds(&self) -> Aabb {
        match self {
            PrimShape::Point(p) => Aabb { min: *p, max: *p },
            PrimShape::Aabb(bb) => *bb,
            PrimShape::Circle(c) => {
                Aabb::from_center_half(c.center, Vec2::splat(c.radius))
            }
            PrimShape::Segment(s) => Aabb::new(s.a, s.b),
            PrimShape::Polygon(poly) => poly.bounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    #[test]
    fn aabb_shared_edge_is_not_overlap() {
        let a = Aabb::new(vec2(0.0, 0.0), vec2(1.0, 1.0));
        let b = Aabb::new(vec2(1.0, 0.0), vec2(2.0, 1.0));
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn aabb_interval_overlap_on_both_axes() {
        let a = Aabb::new(vec2(0.0, 0.0), vec2(2.0, 2.0));
        let b = Aabb::new(vec2(1.0, 1.0), vec2(3.0, 3.0));
        assert!(a.overlaps(&b));
        // Overlap on x only is not enough
        let c = Aabb::new(vec2(1.0, 5.0), vec2(3.0, 6.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn polygon_bounds_cover_all_vertices() {
        let poly = Polygon::from_points([
            vec2(-1.0, 0.0),
            vec2(2.0, -3.0),
            vec2(0.5, 4.0),
        ]);
        let bb = PrimShape::Polygon(poly).bounds();
        assert_eq!(bb.min, vec2(-1.0, -3.0));
        assert_eq!(bb.max, vec2(2.0, 4.0));
    }
}
