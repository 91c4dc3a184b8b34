//! Collision query facade: what-if occupancy checks, nearest-of-group, and
//! shape traces, all built on the grid broad phase plus the exact narrow
//! phase from `collision_core`.
//!
//! What-if queries are pure: the probed entity's shape is resolved at the
//! hypothetical position and tested there; the stored pose and the grid are
//! never touched. Filters go through the scene's group canonicalization, so
//! an unknown group name matches anything instead of erroring.

use collision_core::{overlaps, resolve, Aabb, Pose, PrimShape, ShapeDesc};
use glam::Vec2;

use crate::entity::EntityId;
use crate::Scene;

impl Scene {
    /// First entity (if any) the probed entity would overlap were it at
    /// `at`. The probe itself is skipped.
    pub fn occupied_at(
        &self,
        id: EntityId,
        at: Vec2,
        filter: Option<&str>,
    ) -> Option<EntityId> {
        let Some(ent) = self.get(id) else {
            log::warn!("scene: occupied_at on unknown entity {id:?}");
            return None;
        };
        let prim = ent.prim_at(at);
        let filter = self.canon_filter(filter);
        let mut cand = Vec::new();
        self.grid.candidates(&prim.bounds(), &mut cand);
        for cid in cand {
            if cid == id {
                continue;
            }
            let Some(other) = self.get(cid) else { continue };
            if !other.matches(filter) {
                continue;
            }
            if overlaps(&prim, &other.prim()) {
                return Some(cid);
            }
        }
        None
    }

    /// All entities the probed entity would overlap at `at`, sorted by id.
    pub fn occupied_multiple(
        &self,
        id: EntityId,
        at: Vec2,
        filter: Option<&str>,
    ) -> Vec<EntityId> {
        let Some(ent) = self.get(id) else {
            log::warn!("scene: occupied_multiple on unknown entity {id:?}");
            return Vec::new();
        };
        let prim = ent.prim_at(at);
        let filter = self.canon_filter(filter);
        let mut cand = Vec::new();
        self.grid.candidates(&prim.bounds(), &mut cand);
        cand.retain(|cid| {
            *cid != id
                && self
                    .get(*cid)
                    .is_some_and(|o| o.matches(filter) && overlaps(&prim, &o.prim()))
        });
        cand
    }

    #[inline]
    pub fn is_free(&self, id: EntityId, at: Vec2, filter: Option<&str>) -> bool {
        self.occupied_at(id, at, filter).is_none()
    }

    /// Nearest entity of `group` to `at` (linear scan; an unknown group
    /// matches any entity).
    pub fn nearest_in_group(&self, at: Vec2, group: Option<&str>) -> Option<EntityId> {
        let filter = self.canon_filter(group);
        let mut best: Option<(f32, EntityId)> = None;
        for e in self.iter() {
            if !e.matches(filter) {
                continue;
            }
            let d2 = (e.pose.pos - at).length_squared();
            if best.map(|(b, _)| d2 < b).unwrap_or(true) {
                best = Some((d2, e.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Entities overlapping an arbitrary probe shape at `pose`. With
    /// `all = false` the scan stops at the first match. Oversized probes
    /// (bounds spanning more cells than the configured threshold on either
    /// axis) skip the grid and scan every entity; partitioning buys nothing
    /// there and the scan keeps the result exact.
    pub fn trace_shape(
        &self,
        shape: &ShapeDesc,
        pose: &Pose,
        filter: Option<&str>,
        all: bool,
    ) -> Vec<EntityId> {
        let t0 = std::time::Instant::now();
        let prim = resolve(shape, pose);
        let filter = self.canon_filter(filter);
        let bounds = prim.bounds();
        let mut hits = Vec::new();
        if self.grid.span_cells(&bounds) > self.brute_force_span_cells {
            metrics::counter!("scene.broadphase_fallback_total").increment(1);
            for e in self.iter() {
                if e.matches(filter) && overlaps(&prim, &e.prim()) {
                    hits.push(e.id);
                    if !all {
                        break;
                    }
                }
            }
        } else {
            let mut cand = Vec::new();
            self.grid.candidates(&bounds, &mut cand);
            for cid in cand {
                let Some(e) = self.get(cid) else { continue };
                if e.matches(filter) && overlaps(&prim, &e.prim()) {
                    hits.push(e.id);
                    if !all {
                        break;
                    }
                }
            }
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0;
        metrics::histogram!("scene.query_ms").record(ms);
        hits
    }

    /// Trace a world-space segment.
    pub fn trace_line(
        &self,
        a: Vec2,
        b: Vec2,
        filter: Option<&str>,
        all: bool,
    ) -> Vec<EntityId> {
        self.trace_shape(
            &ShapeDesc::Segment { a: Vec2::ZERO, b: b - a },
            &Pose::at(a),
            filter,
            all,
        )
    }

    /// Trace a world-space axis-aligned rectangle.
    pub fn trace_rect(&self, bb: Aabb, filter: Option<&str>, all: bool) -> Vec<EntityId> {
        let center = (bb.min + bb.max) * 0.5;
        let half = (bb.max - bb.min) * 0.5;
        self.trace_shape(
            &ShapeDesc::Rect { min: -half, max: half },
            &Pose::at(center),
            filter,
            all,
        )
    }

    /// Trace a world-space circle.
    pub fn trace_circle(
        &self,
        center: Vec2,
        radius: f32,
        filter: Option<&str>,
        all: bool,
    ) -> Vec<EntityId> {
        self.trace_shape(&ShapeDesc::Circle { radius }, &Pose::at(center), filter, all)
    }

    /// Advance an entity along `dir` in fixed substeps until the next step
    /// would overlap something matching `filter`, then commit the final pose.
    /// Returns the distance actually moved.
    pub fn move_contact(
        &mut self,
        id: EntityId,
        dir: Vec2,
        max_dist: f32,
        filter: Option<&str>,
    ) -> f32 {
        const STEP_M: f32 = 0.1;
        let dir = dir.normalize_or_zero();
        if dir == Vec2::ZERO || max_dist <= 0.0 {
            return 0.0;
        }
        let Some(ent) = self.get(id) else {
            log::warn!("scene: move_contact on unknown entity {id:?}");
            return 0.0;
        };
        let start = ent.pose.pos;
        let pose = ent.pose;
        let mut moved = 0.0f32;
        let mut steps = 0u64;
        while moved < max_dist {
            let step = STEP_M.min(max_dist - moved);
            let next = start + dir * (moved + step);
            if self.occupied_at(id, next, filter).is_some() {
                break;
            }
            moved += step;
            steps += 1;
        }
        if moved > 0.0 {
            self.set_pose(id, pose.moved_to(start + dir * moved));
        }
        metrics::histogram!("scene.move_contact_steps").record(steps as f64);
        moved
    }

    /// Point probe: does anything matching `filter` cover this position?
    pub fn occupied_at_point(&self, at: Vec2, filter: Option<&str>) -> Option<EntityId> {
        let prim = PrimShape::Point(at);
        let filter = self.canon_filter(filter);
        let mut cand = Vec::new();
        self.grid.candidates(&prim.bounds(), &mut cand);
        cand.into_iter().find(|cid| {
            self.get(*cid)
                .is_some_and(|e| e.matches(filter) && overlaps(&prim, &e.prim()))
        })
    }
}
