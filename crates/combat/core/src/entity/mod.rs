//! Combat entities.
//!
//! An [`Entity`] is split in three so its parts can borrow each other:
//!
//! - [`EntityBody`]: identity, attributes, senses, timers and the event buffer.
//!   This is the owner every state callback and scheduled task receives.
//! - the per-entity state machine, whose states are registered by the variant
//!   (`player` or `enemy`) plus the shared Dead/Stunned/Casting states.
//! - a cooperative [`Scheduler`] for delayed callbacks.
//!
//! Entities are built and destroyed only by the [`EntityManager`](crate::EntityManager).

mod body;
mod data;
mod enemy;
mod player;
mod states;
mod types;

pub use body::{EntityBody, Role, Senses};
pub use data::EntityData;
pub use enemy::EnemyBrain;
pub use player::PlayerControl;
pub use types::{EntityId, EntityStateType, EntityType};

use state_machine::ChangeOutcome;

use crate::attributes::{AttributeStore, AttributeType};
use crate::config::CombatConfig;
use crate::damage::DamageType;
use crate::env::CombatEnv;
use crate::events::CombatEvent;
use crate::timer::{Scheduler, TaskId};
use states::EntityMachine;

pub struct Entity {
    body: EntityBody,
    fsm: EntityMachine,
    scheduler: Scheduler<EntityBody>,
}

impl Entity {
    /// Builds the entity, registers its states and enters Idle.
    ///
    /// `data` is assumed to be validated.
    pub(crate) fn init(id: EntityId, data: &EntityData, config: &CombatConfig) -> Self {
        let mut fsm = EntityMachine::new();
        states::register_shared_states(&mut fsm);

        let role = match data.entity_type {
            EntityType::Player => {
                player::register_states(&mut fsm, &config.player);
                Role::Player(PlayerControl::new(config.player))
            }
            EntityType::Enemy => {
                let tuning = data.ai.unwrap_or(config.enemy_ai);
                enemy::register_states(&mut fsm, &tuning);
                Role::Enemy(EnemyBrain::new(tuning))
            }
        };

        let mut entity = Self {
            body: EntityBody::new(id, data, role),
            fsm,
            scheduler: Scheduler::new(),
        };
        entity.change_state(EntityStateType::Idle);

        tracing::debug!(
            "Initialized {} {} ({}) with {} states",
            data.entity_type,
            data.name,
            id,
            entity.fsm.state_count()
        );
        entity
    }

    pub fn id(&self) -> EntityId {
        self.body.id()
    }

    pub fn name(&self) -> &str {
        self.body.name()
    }

    pub fn entity_type(&self) -> EntityType {
        self.body.entity_type()
    }

    pub fn body(&self) -> &EntityBody {
        &self.body
    }

    pub fn attributes(&self) -> &AttributeStore {
        self.body.attributes()
    }

    pub fn attributes_mut(&mut self) -> &mut AttributeStore {
        self.body.attributes_mut()
    }

    pub fn collision_radius(&self) -> f32 {
        self.body.collision_radius()
    }

    pub fn is_active(&self) -> bool {
        self.body.is_active()
    }

    pub fn set_active(&mut self, active: bool) {
        self.body.set_active(active);
    }

    pub fn current_state(&self) -> EntityStateType {
        self.fsm.current_state().unwrap_or(EntityStateType::None)
    }

    pub fn is_in(&self, state: EntityStateType) -> bool {
        self.fsm.is_in(state)
    }

    pub fn is_alive(&self) -> bool {
        !self.fsm.is_in(EntityStateType::Dead)
    }

    /// Who dealt the killing blow, if the entity died to an attacker.
    pub fn killer(&self) -> Option<EntityId> {
        self.body.killer()
    }

    /// Requests a state change and records it as a `StateChanged` event.
    ///
    /// Returns `true` if the state actually changed.
    pub fn change_state(&mut self, to: EntityStateType) -> bool {
        let outcome = self.fsm.change_state(to, &mut self.body);
        self.record_transition(outcome)
    }

    /// Advances the entity by one frame.
    ///
    /// Order: sample senses, run due scheduled tasks, update the current
    /// state, then tick attribute modifiers.
    pub fn on_update(&mut self, delta_time: f32, env: &CombatEnv<'_>) {
        self.body.sense(delta_time, env);
        self.scheduler.tick(delta_time, &mut self.body);

        if let Some(outcome) = self.fsm.update(&mut self.body) {
            self.record_transition(outcome);
        }

        self.body.attributes_mut().tick(delta_time);
    }

    /// Releases owned resources. The entity stays readable but inactive.
    pub fn on_destroy(&mut self) {
        self.body.attributes_mut().clear_modifiers();
        self.scheduler.clear();
        self.body.set_active(false);
        tracing::debug!("Destroyed {} ({})", self.name(), self.id());
    }

    /// Untyped damage intake: `max(1, damage - Defense)` off current Health.
    ///
    /// Returns the damage applied, which may exceed the health that was left.
    pub fn take_damage(&mut self, damage: f32, attacker: Option<EntityId>) -> f32 {
        let defense = self.body.attributes().current(AttributeType::Defense);
        let actual_damage = (damage - defense).max(1.0);
        self.apply_health_loss(actual_damage, attacker, None, false)
    }

    /// Typed damage intake.
    ///
    /// Uses the same flat subtraction as [`take_damage`](Self::take_damage).
    /// `damage_type` and `is_critical` are only reported in the event, not
    /// used for mitigation.
    pub fn take_damage_typed(
        &mut self,
        damage: f32,
        attacker: Option<EntityId>,
        damage_type: DamageType,
        is_critical: bool,
    ) -> f32 {
        let defense = self.body.attributes().current(AttributeType::Defense);
        let mut actual_damage = damage - defense;
        if actual_damage < 1.0 {
            actual_damage = 1.0;
        }
        self.apply_health_loss(actual_damage, attacker, Some(damage_type), is_critical)
    }

    fn apply_health_loss(
        &mut self,
        amount: f32,
        attacker: Option<EntityId>,
        damage_type: Option<DamageType>,
        is_critical: bool,
    ) -> f32 {
        let health = self.body.attributes().current(AttributeType::Health);
        let remaining = (health - amount).max(0.0);
        self.body
            .attributes_mut()
            .set_current_direct(AttributeType::Health, remaining);

        // Hits on a corpse still go through intake but are not reported.
        if !self.is_alive() {
            return amount;
        }

        let target = self.id();
        self.body.emit(CombatEvent::Damaged {
            target,
            source: attacker,
            amount,
            damage_type,
            is_critical,
            remaining_health: remaining,
        });

        if remaining <= 0.0 {
            self.die(attacker);
        }
        amount
    }

    /// Moves the entity to Dead and reports the defeat.
    ///
    /// No-op for an entity that is already dead.
    pub fn die(&mut self, killer: Option<EntityId>) {
        if !self.is_alive() {
            return;
        }
        self.change_state(EntityStateType::Dead);
        self.body.record_death(killer);
    }

    /// Restores Health, capped at MaxHealth when that attribute exists.
    ///
    /// Returns the amount actually restored. Dead entities cannot be healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        if !self.is_alive() || amount <= 0.0 {
            return 0.0;
        }

        let attributes = self.body.attributes();
        let health = attributes.current(AttributeType::Health);
        let cap = if attributes.has_attribute(AttributeType::MaxHealth) {
            attributes.current(AttributeType::MaxHealth)
        } else {
            f32::INFINITY
        };
        let healed_to = (health + amount).min(cap).max(health);
        let healed = healed_to - health;
        if healed <= 0.0 {
            return 0.0;
        }

        self.body
            .attributes_mut()
            .set_current_direct(AttributeType::Health, healed_to);
        let entity = self.id();
        self.body.emit(CombatEvent::Healed {
            entity,
            amount: healed,
        });
        healed
    }

    /// Stuns the entity for `duration` seconds, then it returns to Combat.
    ///
    /// Restarts the timer if already stunned. Returns `false` for dead entities.
    pub fn stun(&mut self, duration: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.body.stun.start(duration);
        self.change_state(EntityStateType::Stunned);
        true
    }

    /// Starts a cast of `duration` seconds, then the entity returns to Combat.
    ///
    /// Only allowed from Idle or Combat.
    pub fn begin_cast(&mut self, duration: f32) -> bool {
        if !(self.is_in(EntityStateType::Idle) || self.is_in(EntityStateType::Combat)) {
            return false;
        }
        self.body.cast.start(duration);
        self.change_state(EntityStateType::Casting)
    }

    /// Runs `task` against the entity body once `delay` seconds of updates
    /// have passed.
    pub fn schedule(&mut self, delay: f32, task: impl FnOnce(&mut EntityBody) + 'static) -> TaskId {
        self.scheduler.schedule(delay, task)
    }

    pub fn cancel_task(&mut self, id: TaskId) -> bool {
        self.scheduler.cancel(id)
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.body.drain_events().collect()
    }

    fn record_transition(&mut self, outcome: ChangeOutcome<EntityStateType>) -> bool {
        match outcome {
            ChangeOutcome::Changed { from, to } => {
                let from = from.unwrap_or(EntityStateType::None);
                let entity = self.id();
                tracing::debug!("{} ({}) {} -> {}", self.name(), entity, from, to);
                self.body
                    .emit(CombatEvent::StateChanged { entity, from, to });
                true
            }
            ChangeOutcome::Unchanged | ChangeOutcome::Unregistered(_) => false,
        }
    }
}

impl core::fmt::Debug for Entity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Entity")
            .field("body", &self.body)
            .field("state", &self.current_state())
            .field("pending_tasks", &self.scheduler.len())
            .finish()
    }
}
