//! Uniform spatial hash over entity bounds (broad phase).
//!
//! Buckets map integer cell keys to the entities whose padded bounds overlap
//! that cell. Maintained incrementally: the scene inserts on spawn, swaps
//! keys on movement, and removes on despawn. Invariant: an entity is present
//! under exactly the keys derived from its current padded bounds.

use std::collections::HashMap;

use collision_core::Aabb;
use smallvec::SmallVec;

use crate::entity::EntityId;

pub type CellKey = (i32, i32);

pub struct SpatialGrid {
    cell_m: f32,
    margin_m: f32,
    buckets: HashMap<CellKey, Vec<EntityId>>,
}

impl SpatialGrid {
    pub fn new(cell_m: f32, margin_m: f32) -> Self {
        Self {
            cell_m: cell_m.max(0.25),
            margin_m: margin_m.max(0.0),
            buckets: HashMap::new(),
        }
    }

    #[inline]
    pub fn cell_m(&self) -> f32 {
        self.cell_m
    }

    /// Cell keys covered by `bounds` after padding. A sub-cell shape sitting
    /// on a cell corner lands in all 4 adjacent cells.
    pub fn keys_for(&self, bounds: &Aabb) -> SmallVec<[CellKey; 4]> {
        let padded = bounds.expand(self.margin_m);
        let x0 = (padded.min.x / self.cell_m).floor() as i32;
        let x1 = (padded.max.x / self.cell_m).floor() as i32;
        let y0 = (padded.min.y / self.cell_m).floor() as i32;
        let y1 = (padded.max.y / self.cell_m).floor() as i32;
        let mut keys = SmallVec::new();
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                keys.push((cx, cy));
            }
        }
        keys
    }

    /// How many cells `bounds` spans on the wider axis (before padding).
    pub fn span_cells(&self, bounds: &Aabb) -> u32 {
        let w = (bounds.width() / self.cell_m).ceil().max(1.0);
        let h = (bounds.height() / self.cell_m).ceil().max(1.0);
        w.max(h) as u32
    }

    pub fn insert(&mut self, id: EntityId, keys: &[CellKey]) {
        for k in keys {
            self.buckets.entry(*k).or_default().push(id);
        }
    }

    pub fn remove(&mut self, id: EntityId, keys: &[CellKey]) {
        for k in keys {
            let mut stale = true;
            let mut now_empty = false;
            if let Some(bucket) = self.buckets.get_mut(k) {
                if let Some(i) = bucket.iter().position(|e| *e == id) {
                    bucket.swap_remove(i);
                    stale = false;
                }
                now_empty = bucket.is_empty();
            }
            if now_empty {
                self.buckets.remove(k);
            }
            if stale {
                // Programmer error (double despawn or key drift); the map
                // itself stays consistent.
                log::warn!("grid: {id:?} not registered under cell {k:?}");
            }
        }
    }

    /// Gather candidate ids for the cells covered by `bounds`, sorted and
    /// deduplicated. No ordering guarantee inside a bucket.
    pub fn candidates(&self, bounds: &Aabb, out: &mut Vec<EntityId>) {
        out.clear();
        for k in self.keys_for(bounds) {
            if let Some(bucket) = self.buckets.get(&k) {
                out.extend_from_slice(bucket);
            }
        }
        out.sort_unstable();
        out.dedup();
    }

    /// Cells currently holding `id` (test/diagnostic helper).
    pub fn cells_containing(&self, id: EntityId) -> Vec<CellKey> {
        let mut cells: Vec<CellKey> = self
            .buckets
            .iter()
            .filter(|(_, bucket)| bucket.contains(&id))
            .map(|(k, _)| *k)
            .collect();
        cells.sort_unstable();
        cells
    }

    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}
