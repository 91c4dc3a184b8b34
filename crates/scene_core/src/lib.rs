//! scene_core: a scene-owned entity registry over a uniform spatial hash,
//! plus the collision query facade built on it.
//!
//! The [`Scene`] owns everything: entities, the broad-phase grid, and the
//! set of known collision groups. There is no global registry; consumers
//! hold a `Scene` and pass it where collision queries are needed. All
//! operations are synchronous and single-threaded; mutation happens between
//! queries, never during one.

use std::collections::HashSet;

use collision_core::{Aabb, Pose, ShapeDesc};
use config_core::configs::collision::CollisionCfg;
use glam::Vec2;

pub mod entity;
pub mod grid;
pub mod query;
pub mod telemetry;

pub use entity::{Entity, EntityId};
pub use grid::{CellKey, SpatialGrid};

pub struct Scene {
    next_id: u32,
    ents: Vec<Entity>,
    grid: SpatialGrid,
    /// Group names any entity has ever registered with. A filter naming an
    /// unknown group is treated as no filter at all.
    groups: HashSet<String>,
    brute_force_span_cells: u32,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_config(&CollisionCfg::default())
    }

    pub fn with_config(cfg: &CollisionCfg) -> Self {
        Self {
            next_id: 1,
            ents: Vec::new(),
            grid: SpatialGrid::new(cfg.cell_m, cfg.margin_m),
            groups: HashSet::new(),
            brute_force_span_cells: cfg.brute_force_span_cells.max(1),
        }
    }

    pub fn spawn(&mut self, shape: ShapeDesc, pose: Pose, group: Option<&str>) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        if let Some(g) = group {
            self.groups.insert(g.to_string());
        }
        let mut ent = Entity {
            id,
            pose,
            shape,
            group: group.map(|g| g.to_string()),
            keys: Default::default(),
        };
        ent.keys = self.grid.keys_for(&ent.bounds());
        self.grid.insert(id, &ent.keys);
        self.ents.push(ent);
        id
    }

    /// Remove an entity and its grid registrations. Despawning an unknown id
    /// is a programmer error; it logs and returns false.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(i) = self.ents.iter().position(|e| e.id == id) else {
            log::warn!("scene: despawn of unknown entity {id:?}");
            return false;
        };
        let ent = self.ents.swap_remove(i);
        self.grid.remove(id, &ent.keys);
        true
    }

    /// Move/rescale/rotate an entity, re-registering it in the grid when its
    /// covered cells change.
    pub fn set_pose(&mut self, id: EntityId, pose: Pose) {
        let Some(i) = self.ents.iter().position(|e| e.id == id) else {
            log::warn!("scene: set_pose on unknown entity {id:?}");
            return;
        };
        self.ents[i].pose = pose;
        self.refresh_registration(i);
    }

    /// Replace an entity's shape descriptor, re-registering as needed.
    pub fn set_shape(&mut self, id: EntityId, shape: ShapeDesc) {
        let Some(i) = self.ents.iter().position(|e| e.id == id) else {
            log::warn!("scene: set_shape on unknown entity {id:?}");
            return;
        };
        self.ents[i].shape = shape;
        self.refresh_registration(i);
    }

    fn refresh_registration(&mut self, i: usize) {
        let new_keys = self.grid.keys_for(&self.ents[i].bounds());
        if new_keys == self.ents[i].keys {
            return;
        }
        let id = self.ents[i].id;
        self.grid.remove(id, &self.ents[i].keys);
        self.grid.insert(id, &new_keys);
        self.ents[i].keys = new_keys;
    }

    #[inline]
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.ents.iter().find(|e| e.id == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ents.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.ents.iter()
    }

    /// Broad-phase only: candidate ids whose cells overlap `bounds`.
    pub fn candidates_for_bounds(&self, bounds: &Aabb) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.grid.candidates(bounds, &mut out);
        out
    }

    /// Cell keys the entity is registered under (diagnostic helper).
    pub fn registered_cells(&self, id: EntityId) -> Vec<CellKey> {
        self.get(id)
            .map(|e| {
                let mut keys: Vec<CellKey> = e.keys.to_vec();
                keys.sort_unstable();
                keys
            })
            .unwrap_or_default()
    }

    /// Cells actually holding the id in the grid (diagnostic helper; equals
    /// `registered_cells` whenever the grid invariant holds).
    pub fn grid_cells_containing(&self, id: EntityId) -> Vec<CellKey> {
        self.grid.cells_containing(id)
    }

    /// Canonicalize a group filter: a name no entity has ever registered
    /// with is treated as "no filter" rather than an error.
    pub(crate) fn canon_filter<'a>(&self, filter: Option<&'a str>) -> Option<&'a str> {
        match filter {
            Some(g) if self.groups.contains(g) => Some(g),
            _ => None,
        }
    }

    /// Convenience for callers that only have a position.
    pub fn spawn_at(
        &mut self,
        shape: ShapeDesc,
        pos: Vec2,
        group: Option<&str>,
    ) -> EntityId {
        self.spawn(shape, Pose::at(pos), group)
    }
}
