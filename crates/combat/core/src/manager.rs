//! Entity ownership and per-frame updates.

use std::collections::BTreeMap;

use crate::config::CombatConfig;
use crate::entity::{Entity, EntityData, EntityId, EntityType};
use crate::env::CombatEnv;
use crate::events::CombatEvent;

/// Owns every live entity and hands out their ids.
///
/// Ids start at 1 and only ever grow: neither [`remove_entity`] nor [`clear`]
/// makes an id available again.
///
/// [`remove_entity`]: EntityManager::remove_entity
/// [`clear`]: EntityManager::clear
#[derive(Debug)]
pub struct EntityManager {
    entities: BTreeMap<EntityId, Entity>,
    next_id: u32,
    config: CombatConfig,
    events: Vec<CombatEvent>,
}

impl EntityManager {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: EntityId::FIRST.0,
            config,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    /// Builds an entity from `data` under the next id.
    ///
    /// Does not validate `data`; [`CombatFacade::spawn`](crate::CombatFacade::spawn)
    /// does that first.
    pub fn create_entity(&mut self, data: &EntityData) -> &mut Entity {
        let id = EntityId(self.next_id);
        self.next_id += 1;

        let mut entity = Entity::init(id, data, &self.config);
        self.events.push(CombatEvent::EntitySpawned {
            entity: id,
            entity_type: data.entity_type,
        });
        self.events.extend(entity.drain_events());

        tracing::debug!("Spawned {} {} as {}", data.entity_type, data.name, id);
        self.entities.entry(id).or_insert(entity)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Destroys and forgets the entity. Returns `false` if it did not exist.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(mut entity) = self.entities.remove(&id) else {
            return false;
        };
        entity.on_destroy();
        self.events.extend(entity.drain_events());
        self.events.push(CombatEvent::EntityRemoved { entity: id });
        true
    }

    /// Updates every active entity once.
    pub fn update(&mut self, delta_time: f32, env: &CombatEnv<'_>) {
        for entity in self.entities.values_mut() {
            if !entity.is_active() {
                continue;
            }
            entity.on_update(delta_time, env);
            self.events.extend(entity.drain_events());
        }
    }

    /// Snapshot of every id currently held.
    pub fn all_entities(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn ids_of_type(&self, entity_type: EntityType) -> Vec<EntityId> {
        self.entities
            .values()
            .filter(|entity| entity.entity_type() == entity_type)
            .map(Entity::id)
            .collect()
    }

    /// Living entities of `entity_type`. Inactive entities still count.
    pub fn living_count(&self, entity_type: EntityType) -> usize {
        self.entities
            .values()
            .filter(|entity| entity.entity_type() == entity_type && entity.is_alive())
            .count()
    }

    /// Destroys every entity. Ids are not recycled afterwards.
    pub fn clear(&mut self) {
        let ids = self.all_entities();
        for id in ids {
            self.remove_entity(id);
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Collects events that entities produced outside of [`update`](Self::update)
    /// (direct damage, heals, stuns) and returns everything buffered so far.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        for entity in self.entities.values_mut() {
            self.events.extend(entity.drain_events());
        }
        std::mem::take(&mut self.events)
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}
