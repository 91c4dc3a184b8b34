//! Shape descriptors and pose resolution (the shape adapter).
//!
//! Entities declare a [`ShapeDesc`] in local space; [`resolve`] applies a
//! [`Pose`] (position, per-axis scale, rotation in degrees) and yields the
//! world-space [`PrimShape`] the narrow phase tests. Degenerate descriptors
//! never panic; they degrade to a point probe so a malformed entity cannot
//! take down the frame loop.

use glam::Vec2;

use crate::{Aabb, Circle, Polygon, PrimShape, Segment};

/// Rotations within this many degrees of a full turn count as axis-aligned.
const ROT_EPS_DEG: f32 = 1e-4;

/// Local-space shape declaration attached to an entity.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeDesc {
    /// Zero-size probe at the entity origin.
    Point,
    /// Rectangle given by local-space corners relative to the origin.
    Rect { min: Vec2, max: Vec2 },
    /// Circle centered on the origin.
    Circle { radius: f32 },
    /// Line segment with local-space endpoints.
    Segment { a: Vec2, b: Vec2 },
    /// Closed vertex loop in local space. Convex loops get exact results.
    Polyline { points: Vec<Vec2> },
}

/// World transform of an entity: position, per-axis scale, rotation in
/// degrees (counter-clockwise). Negative scale mirrors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub pos: Vec2,
    pub scale: Vec2,
    pub rot_deg: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self { pos: Vec2::ZERO, scale: Vec2::ONE, rot_deg: 0.0 }
    }
}

impl Pose {
    #[inline]
    pub fn at(pos: Vec2) -> Self {
        Self { pos, ..Default::default() }
    }

    #[inline]
    pub fn with_scale(mut self, scale: Vec2) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn with_rot_deg(mut self, deg: f32) -> Self {
        self.rot_deg = deg;
        self
    }

    /// Pose with the same scale/rotation but a different position. What-if
    /// queries use this instead of mutating the stored pose.
    #[inline]
    pub fn moved_to(&self, pos: Vec2) -> Self {
        Self { pos, ..*self }
    }

    #[inline]
    fn is_axis_aligned(&self) -> bool {
        self.rot_deg.rem_euclid(360.0).min((360.0 - self.rot_deg.rem_euclid(360.0)).abs())
            < ROT_EPS_DEG
    }

    /// Transform a local point: scale, then rotate, then translate.
    #[inline]
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let scaled = local * self.scale;
        let rad = self.rot_deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        let rotated = Vec2::new(
            scaled.x * cos - scaled.y * sin,
            scaled.x * sin + scaled.y * cos,
        );
        self.pos + rotated
    }
}

/// Resolve a local-space descriptor against a pose into a world primitive.
pub fn resolve(shape: &ShapeDesc, pose: &Pose) -> PrimShape {
    match shape {
        ShapeDesc::Point => PrimShape::Point(pose.pos),
        ShapeDesc::Rect { min, max } => resolve_rect(*min, *max, pose),
        ShapeDesc::Circle { radius } => {
            let r = radius * pose.scale.x.abs().max(pose.scale.y.abs());
            if r <= 0.0 {
                PrimShape::Point(pose.pos)
            } else {
                PrimShape::Circle(Circle { center: pose.pos, radius: r })
            }
        }
        ShapeDesc::Segment { a, b } => {
            let wa = pose.apply(*a);
            let wb = pose.apply(*b);
            if wa == wb {
                PrimShape::Point(wa)
            } else {
                PrimShape::Segment(Segment { a: wa, b: wb })
            }
        }
        ShapeDesc::Polyline { points } => resolve_polyline(points, pose),
    }
}

fn resolve_rect(min: Vec2, max: Vec2, pose: &Pose) -> PrimShape {
    if min.x >= max.x || min.y >= max.y {
        return PrimShape::Point(pose.pos);
    }
    if pose.is_axis_aligned() {
        // Negative scale mirrors; Aabb::new re-normalizes the corners.
        let a = pose.pos + min * pose.scale;
        let b = pose.pos + max * pose.scale;
        let bb = Aabb::new(a, b);
        if bb.width() <= 0.0 || bb.height() <= 0.0 {
            return PrimShape::Point(pose.pos);
        }
        return PrimShape::Aabb(bb);
    }
    let corners = [
        Vec2::new(min.x, min.y),
        Vec2::new(max.x, min.y),
        Vec2::new(max.x, max.y),
        Vec2::new(min.x, max.y),
    ];
    PrimShape::Polygon(Polygon::from_points(corners.iter().map(|c| pose.apply(*c))))
}

fn resolve_polyline(points: &[Vec2], pose: &Pose) -> PrimShape {
    match points.len() {
        0 => PrimShape::Point(pose.pos),
        1 => PrimShape::Point(pose.apply(points[0])),
        2 => {
            let a = pose.apply(points[0]);
            let b = pose.apply(points[1]);
            if a == b {
                PrimShape::Point(a)
            } else {
                PrimShape::Segment(Segment { a, b })
            }
        }
        _ => PrimShape::Polygon(Polygon::from_points(
            points.iter().map(|p| pose.apply(*p)),
        )),
    }
}
