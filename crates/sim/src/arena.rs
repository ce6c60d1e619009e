//! One-dimensional arena standing in for the host's spatial layer.
//!
//! Entities sit on a line. Engaged entities walk toward their nearest living
//! hostile until they are within reach, and range queries are answered by a
//! [`DistanceTable`] rebuilt from positions every frame.

use std::collections::BTreeMap;

use combat_core::{AttributeType, DistanceTable, Entity, EntityId, EntityManager, EntityStateType};

/// Gap players close to before stopping.
const PLAYER_REACH: f32 = 1.0;

/// Enemies stop a little inside their attack range.
const ENEMY_REACH_FACTOR: f32 = 0.8;

#[derive(Debug, Default)]
pub struct Arena {
    positions: BTreeMap<EntityId, f32>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(&mut self, id: EntityId, x: f32) {
        self.positions.insert(id, x);
    }

    pub fn position(&self, id: EntityId) -> Option<f32> {
        self.positions.get(&id).copied()
    }

    /// Edge-to-edge gap between two entities, never negative.
    fn gap(&self, a: &Entity, b: &Entity) -> Option<f32> {
        let (xa, xb) = (self.position(a.id())?, self.position(b.id())?);
        Some(((xa - xb).abs() - a.collision_radius() - b.collision_radius()).max(0.0))
    }

    /// Closest living entity of the opposing type.
    pub fn nearest_hostile(&self, entities: &EntityManager, id: EntityId) -> Option<(EntityId, f32)> {
        let me = entities.entity(id)?;
        entities
            .entities()
            .filter(|other| other.entity_type() != me.entity_type() && other.is_alive())
            .filter_map(|other| Some((other.id(), self.gap(me, other)?)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// How close `entity` must be to strike.
    pub fn reach(entity: &Entity) -> f32 {
        entity
            .body()
            .brain()
            .map_or(PLAYER_REACH, |brain| brain.tuning.attack_range)
    }

    /// Nearest-hostile distances for every living entity.
    pub fn distances(&self, entities: &EntityManager) -> DistanceTable {
        let mut table = DistanceTable::new();
        for entity in entities.entities().filter(|entity| entity.is_alive()) {
            if let Some((_, gap)) = self.nearest_hostile(entities, entity.id()) {
                table.set(entity.id(), gap);
            }
        }
        table
    }

    /// Moves every engaged entity toward its nearest hostile.
    pub fn advance(&mut self, entities: &EntityManager, delta_time: f32) {
        let mut moves = Vec::new();

        for entity in entities.entities() {
            if !entity.is_in(EntityStateType::Combat) {
                continue;
            }
            let Some((target, gap)) = self.nearest_hostile(entities, entity.id()) else {
                continue;
            };
            let stop_at = entity
                .body()
                .brain()
                .map_or(PLAYER_REACH, |brain| brain.tuning.attack_range * ENEMY_REACH_FACTOR);
            if gap <= stop_at {
                continue;
            }

            let speed = entity.attributes().current(AttributeType::Speed);
            let step = (speed * delta_time).min(gap - stop_at);
            if let (Some(from), Some(to)) = (self.position(entity.id()), self.position(target)) {
                moves.push((entity.id(), from + step * (to - from).signum()));
            }
        }

        for (id, x) in moves {
            self.place(id, x);
        }
    }
}
