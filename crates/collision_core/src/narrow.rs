//! Narrow phase: exact overlap tests between resolved primitives.
//!
//! Convention: overlap is strict. Boundary contact (shared edges, tangent
//! circles, a point on a rim) is not overlap. Polygon pairs pre-reject via
//! bounding boxes before the separating-axis test.

use glam::Vec2;

use crate::{Aabb, Circle, Polygon, PrimShape, Segment};

const COLLINEAR_EPS: f32 = 1e-6;

/// Exact overlap test between two primitives. Symmetric:
/// `overlaps(a, b) == overlaps(b, a)` for every pair of kinds.
pub fn overlaps(a: &PrimShape, b: &PrimShape) -> bool {
    use PrimShape::*;
    match (a, b) {
        (Point(p), Point(q)) => p == q,

        (Point(p), Aabb(bb)) | (Aabb(bb), Point(p)) => bb.contains(*p),
        (Point(p), Circle(c)) | (Circle(c), Point(p)) => point_in_circle(*p, c),
        (Point(p), Segment(s)) | (Segment(s), Point(p)) => segment_contains_point(s, *p),
        (Point(p), Polygon(poly)) | (Polygon(poly), Point(p)) => {
            poly.bounds().expand(COLLINEAR_EPS).contains(*p)
                && point_in_polygon(*p, &poly.points)
        }

        (Aabb(x), Aabb(y)) => x.overlaps(y),
        (Aabb(bb), Circle(c)) | (Circle(c), Aabb(bb)) => aabb_circle(bb, c),
        (Aabb(bb), Segment(s)) | (Segment(s), Aabb(bb)) => aabb_segment(bb, s),
        (Aabb(bb), Polygon(poly)) | (Polygon(poly), Aabb(bb)) => {
            bb.overlaps(&poly.bounds()) && sat_polygons(&aabb_corners(bb), &poly.points)
        }

        (Circle(x), Circle(y)) => circle_circle(x, y),
        (Circle(c), Segment(s)) | (Segment(s), Circle(c)) => segment_circle(s, c),
        (Circle(c), Polygon(poly)) | (Polygon(poly), Circle(c)) => {
            poly.bounds().expand(c.radius).contains(c.center) && polygon_circle(poly, c)
        }

        (Segment(x), Segment(y)) => segments_intersect(x.a, x.b, y.a, y.b),
        (Segment(s), Polygon(poly)) | (Polygon(poly), Segment(s)) => {
            PrimShape::Segment(*s)
                .bounds()
                .expand(COLLINEAR_EPS)
                .overlaps(&poly.bounds().expand(COLLINEAR_EPS))
                && polygon_segment(poly, s)
        }

        (Polygon(x), Polygon(y)) => {
            x.bounds().overlaps(&y.bounds()) && sat_polygons(&x.points, &y.points)
        }
    }
}

#[inline]
fn point_in_circle(p: Vec2, c: &Circle) -> bool {
    (p - c.center).length_squared() < c.radius * c.radius
}

#[inline]
fn circle_circle(a: &Circle, b: &Circle) -> bool {
    let r = a.radius + b.radius;
    (a.center - b.center).length_squared() < r * r
}

#[inline]
fn aabb_circle(bb: &Aabb, c: &Circle) -> bool {
    let closest = c.center.clamp(bb.min, bb.max);
    (closest - c.center).length_squared() < c.radius * c.radius
}

#[inline]
fn closest_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= COLLINEAR_EPS * COLLINEAR_EPS {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

#[inline]
fn segment_circle(s: &Segment, c: &Circle) -> bool {
    let closest = closest_on_segment(c.center, s.a, s.b);
    (closest - c.center).length_squared() < c.radius * c.radius
}

/// True when `p` lies on the segment (within a collinearity epsilon).
fn segment_contains_point(s: &Segment, p: Vec2) -> bool {
    let ab = s.b - s.a;
    let ap = p - s.a;
    if ab.perp_dot(ap).abs() > COLLINEAR_EPS * ab.length().max(1.0) {
        return false;
    }
    let dot = ap.dot(ab);
    dot >= 0.0 && dot <= ab.length_squared()
}

/// 2D slab test; strict, so a segment grazing along a face does not count.
fn aabb_segment(bb: &Aabb, s: &Segment) -> bool {
    let d = s.b - s.a;
    let mut tmin = 0.0f32;
    let mut tmax = 1.0f32;
    for i in 0..2 {
        let start = s.a[i];
        let dir = d[i];
        if dir.abs() < 1e-9 {
            if start <= bb.min[i] || start >= bb.max[i] {
                return false;
            }
        } else {
            let inv = 1.0 / dir;
            let mut t0 = (bb.min[i] - start) * inv;
            let mut t1 = (bb.max[i] - start) * inv;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            tmin = tmin.max(t0);
            tmax = tmax.min(t1);
            if tmin >= tmax {
                return false;
            }
        }
    }
    true
}

/// True when the segments cross at a single interior point (strict sign
/// change on both sides). Collinear or endpoint contact does not count.
fn segments_properly_cross(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let d1 = (b - a).perp_dot(c - a);
    let d2 = (b - a).perp_dot(d - a);
    let d3 = (d - c).perp_dot(a - c);
    let d4 = (d - c).perp_dot(b - c);
    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

fn segments_intersect(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    if segments_properly_cross(a, b, c, d) {
        return true;
    }
    // Collinear segments overlap when their projections share positive length.
    let d1 = (b - a).perp_dot(c - a);
    let d2 = (b - a).perp_dot(d - a);
    let d3 = (d - c).perp_dot(a - c);
    let d4 = (d - c).perp_dot(b - c);
    let scale = (b - a).length().max((d - c).length()).max(1.0);
    let eps = COLLINEAR_EPS * scale;
    if d1.abs() < eps && d2.abs() < eps && d3.abs() < eps && d4.abs() < eps {
        let ab = b - a;
        let lo = (c - a).dot(ab).min((d - a).dot(ab));
        let hi = (c - a).dot(ab).max((d - a).dot(ab));
        return lo < ab.length_squared() && hi > 0.0;
    }
    false
}

/// Even-odd crossing test; strict interior for points clear of the edges.
fn point_in_polygon(p: Vec2, pts: &[Vec2]) -> bool {
    let n = pts.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = pts[i];
        let pj = pts[j];
        if (pi.y > p.y) != (pj.y > p.y) {
            let x = pi.x + (p.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Separating-axis test over both polygons' edge normals. Assumes convex
/// input; projection intervals must overlap strictly on every axis.
fn sat_polygons(a: &[Vec2], b: &[Vec2]) -> bool {
    separated_on_any_axis(a, a, b).is_none() && separated_on_any_axis(b, a, b).is_none()
}

fn separated_on_any_axis(edges_of: &[Vec2], a: &[Vec2], b: &[Vec2]) -> Option<usize> {
    let n = edges_of.len();
    for i in 0..n {
        let edge = edges_of[(i + 1) % n] - edges_of[i];
        let axis = Vec2::new(-edge.y, edge.x);
        if axis.length_squared() <= COLLINEAR_EPS * COLLINEAR_EPS {
            continue;
        }
        let (a_min, a_max) = project(a, axis);
        let (b_min, b_max) = project(b, axis);
        if a_max <= b_min || b_max <= a_min {
            return Some(i);
        }
    }
    None
}

#[inline]
fn project(pts: &[Vec2], axis: Vec2) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for p in pts {
        let d = p.dot(axis);
        lo = lo.min(d);
        hi = hi.max(d);
    }
    (lo, hi)
}

fn polygon_circle(poly: &Polygon, c: &Circle) -> bool {
    if point_in_polygon(c.center, &poly.points) {
        return true;
    }
    let n = poly.points.len();
    for i in 0..n {
        let a = poly.points[i];
        let b = poly.points[(i + 1) % n];
        let closest = closest_on_segment(c.center, a, b);
        if (closest - c.center).length_squared() < c.radius * c.radius {
            return true;
        }
    }
    false
}

fn polygon_segment(poly: &Polygon, s: &Segment) -> bool {
    let n = poly.points.len();
    for i in 0..n {
        let a = poly.points[i];
        let b = poly.points[(i + 1) % n];
        // Only proper crossings count. A segment collinear with an edge stays
        // on the boundary, which is not overlap (same answer as the slab test
        // gives when the rect resolved to an Aabb instead).
        if segments_properly_cross(a, b, s.a, s.b) {
            return true;
        }
    }
    // No proper edge crossing: overlap iff some of the segment is strictly
    // interior. The midpoint catches a segment threading through vertices
    // with both endpoints outside.
    let mid = (s.a + s.b) * 0.5;
    point_in_polygon(s.a, &poly.points)
        || point_in_polygon(s.b, &poly.points)
        || point_in_polygon(mid, &poly.points)
}

fn aabb_corners(bb: &Aabb) -> [Vec2; 4] {
    [
        bb.min,
        Vec2::new(bb.max.x, bb.min.y),
        bb.max,
        Vec2::new(bb.min.x, bb.max.y),
    ]
}
