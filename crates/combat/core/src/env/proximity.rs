use std::collections::HashMap;

use crate::entity::EntityId;

/// Range queries answered by the host's spatial layer.
pub trait ProximityOracle: Send + Sync {
    /// Returns `true` if any entity hostile to `entity` is within `range`
    /// world units (inclusive).
    fn hostile_within(&self, entity: EntityId, range: f32) -> bool;
}

/// Precomputed nearest-hostile distances, one per entity.
///
/// Entities without an entry have no hostile in sight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DistanceTable {
    nearest: HashMap<EntityId, f32>,
}

impl DistanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, entity: EntityId, distance: f32) {
        self.nearest.insert(entity, distance);
    }

    pub fn remove(&mut self, entity: EntityId) {
        self.nearest.remove(&entity);
    }

    pub fn distance(&self, entity: EntityId) -> Option<f32> {
        self.nearest.get(&entity).copied()
    }

    pub fn clear(&mut self) {
        self.nearest.clear();
    }
}

impl ProximityOracle for DistanceTable {
    fn hostile_within(&self, entity: EntityId, range: f32) -> bool {
        self.distance(entity).is_some_and(|distance| distance <= range)
    }
}
