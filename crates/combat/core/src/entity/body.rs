use super::enemy::EnemyBrain;
use super::player::PlayerControl;
use super::{EntityData, EntityId, EntityType};
use crate::attributes::AttributeStore;
use crate::env::CombatEnv;
use crate::events::CombatEvent;
use crate::timer::Countdown;

/// What an entity perceived at the start of the current update.
///
/// Sampled once per frame from [`CombatEnv`], so every state callback in that
/// frame sees the same answers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Senses {
    pub hostile_in_detection: bool,
    pub hostile_in_attack: bool,
    pub hostile_in_disengage: bool,
    pub trigger_pressed: bool,
    /// The entity may make decisions this frame.
    pub think_ready: bool,
    /// No attack cooldown pending.
    pub attack_ready: bool,
}

/// Variant-specific data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Role {
    Player(PlayerControl),
    Enemy(EnemyBrain),
}

impl Role {
    fn sense(&mut self, id: EntityId, delta_time: f32, env: &CombatEnv<'_>) -> Senses {
        match self {
            Role::Player(control) => control.sense(id, env),
            Role::Enemy(brain) => brain.sense(id, delta_time, env),
        }
    }

    fn defeat_event(&self, entity: EntityId, killer: Option<EntityId>) -> CombatEvent {
        match self {
            Role::Player(_) => CombatEvent::PlayerDefeated { entity },
            Role::Enemy(_) => CombatEvent::EnemyDefeated { entity, killer },
        }
    }
}

/// Everything an entity owns except its state machine and scheduler.
///
/// State callbacks and scheduled tasks receive this as their owner.
#[derive(Debug)]
pub struct EntityBody {
    id: EntityId,
    name: String,
    entity_type: EntityType,
    attributes: AttributeStore,
    collision_radius: f32,
    active: bool,
    senses: Senses,
    delta_time: f32,
    role: Role,
    pub(crate) stun: Countdown,
    pub(crate) cast: Countdown,
    killer: Option<EntityId>,
    events: Vec<CombatEvent>,
}

impl EntityBody {
    pub(crate) fn new(id: EntityId, data: &EntityData, role: Role) -> Self {
        Self {
            id,
            name: data.name.clone(),
            entity_type: data.entity_type,
            attributes: AttributeStore::new(data.base_attributes.iter().map(|(&k, &v)| (k, v))),
            collision_radius: data.collision_radius,
            active: true,
            senses: Senses::default(),
            delta_time: 0.0,
            role,
            stun: Countdown::ready(),
            cast: Countdown::ready(),
            killer: None,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeStore {
        &mut self.attributes
    }

    pub fn collision_radius(&self) -> f32 {
        self.collision_radius
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn senses(&self) -> Senses {
        self.senses
    }

    /// Delta time of the update in progress.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn brain(&self) -> Option<&EnemyBrain> {
        match &self.role {
            Role::Enemy(brain) => Some(brain),
            Role::Player(_) => None,
        }
    }

    pub fn brain_mut(&mut self) -> Option<&mut EnemyBrain> {
        match &mut self.role {
            Role::Enemy(brain) => Some(brain),
            Role::Player(_) => None,
        }
    }

    pub fn killer(&self) -> Option<EntityId> {
        self.killer
    }

    pub fn stun_remaining(&self) -> f32 {
        self.stun.remaining()
    }

    pub fn cast_remaining(&self) -> f32 {
        self.cast.remaining()
    }

    pub fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    pub(crate) fn drain_events(&mut self) -> impl Iterator<Item = CombatEvent> + '_ {
        self.events.drain(..)
    }

    pub(crate) fn sense(&mut self, delta_time: f32, env: &CombatEnv<'_>) {
        self.delta_time = delta_time;
        self.senses = self.role.sense(self.id, delta_time, env);
    }

    pub(crate) fn record_death(&mut self, killer: Option<EntityId>) {
        self.killer = killer;
        self.events.push(CombatEvent::Died {
            entity: self.id,
            killer,
        });
        let defeat = self.role.defeat_event(self.id, killer);
        self.events.push(defeat);
    }
}
