//! Entity records owned by the scene.

use collision_core::{resolve, Aabb, Pose, PrimShape, ShapeDesc};
use smallvec::SmallVec;

use crate::grid::CellKey;

/// Entity handle local to one scene (opaque index).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityId(pub u32);

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub pose: Pose,
    pub shape: ShapeDesc,
    /// Collision-group tag used to filter queries. Untagged entities pass
    /// only when the query carries no group filter.
    pub group: Option<String>,
    /// Cell keys this entity is currently registered under.
    pub(crate) keys: SmallVec<[CellKey; 4]>,
}

impl Entity {
    /// World-space primitive at the stored pose.
    #[inline]
    pub fn prim(&self) -> PrimShape {
        resolve(&self.shape, &self.pose)
    }

    /// World-space primitive at a hypothetical position (same scale and
    /// rotation). What-if queries resolve through this; nothing is mutated.
    #[inline]
    pub fn prim_at(&self, pos: glam::Vec2) -> PrimShape {
        resolve(&self.shape, &self.pose.moved_to(pos))
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.prim().bounds()
    }

    /// True when this entity's tag passes the (already canonicalized) filter.
    #[inline]
    pub(crate) fn matches(&self, filter: Option<&str>) -> bool {
        match filter {
            None => true,
            Some(f) => self.group.as_deref() == Some(f),
        }
    }
}
