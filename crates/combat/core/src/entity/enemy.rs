//! AI-driven enemies.
//!
//! Decisions are only taken on think ticks (every `think_interval` seconds).
//! The attack cooldown keeps running every frame regardless.

use state_machine::{State, Transition};

use super::states::{AttackWindow, EntityMachine};
use super::{EntityBody, EntityId, EntityStateType, Senses};
use crate::config::EnemyAiConfig;
use crate::env::CombatEnv;
use crate::timer::{Countdown, Interval};

/// Enemy-specific data carried in [`Role::Enemy`](super::Role::Enemy).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyBrain {
    pub tuning: EnemyAiConfig,
    pub attack_cooldown: Countdown,
    think: Interval,
}

impl EnemyBrain {
    pub fn new(tuning: EnemyAiConfig) -> Self {
        Self {
            tuning,
            attack_cooldown: Countdown::ready(),
            think: Interval::new(tuning.think_interval),
        }
    }

    pub fn start_cooldown(&mut self) {
        self.attack_cooldown.start(self.tuning.attack_cooldown);
    }

    pub(crate) fn sense(&mut self, id: EntityId, delta_time: f32, env: &CombatEnv<'_>) -> Senses {
        self.attack_cooldown.tick(delta_time);
        let think_ready = self.think.tick(delta_time);

        Senses {
            hostile_in_detection: env.hostile_within(id, self.tuning.detection_range),
            hostile_in_attack: env.hostile_within(id, self.tuning.attack_range),
            hostile_in_disengage: env.hostile_within(id, self.tuning.disengage_range),
            trigger_pressed: false,
            think_ready,
            attack_ready: self.attack_cooldown.is_ready(),
        }
    }
}

pub(crate) fn register_states(fsm: &mut EntityMachine, tuning: &EnemyAiConfig) {
    fsm.add_state(EntityStateType::Idle, EnemyIdle);
    fsm.add_state(EntityStateType::Combat, EnemyCombat);
    fsm.add_state(
        EntityStateType::Attacking,
        EnemyAttacking {
            window: AttackWindow::new(tuning.attack_duration),
        },
    );
}

struct EnemyIdle;

impl State<EntityStateType, EntityBody> for EnemyIdle {
    fn update(&mut self, owner: &mut EntityBody) -> Transition<EntityStateType> {
        let senses = owner.senses();
        if senses.think_ready && senses.hostile_in_detection {
            tracing::debug!("{} ({}) spotted a hostile", owner.name(), owner.id());
            Transition::To(EntityStateType::Combat)
        } else {
            Transition::Stay
        }
    }
}

struct EnemyCombat;

impl State<EntityStateType, EntityBody> for EnemyCombat {
    fn update(&mut self, owner: &mut EntityBody) -> Transition<EntityStateType> {
        let senses = owner.senses();
        if !senses.think_ready {
            return Transition::Stay;
        }

        if senses.attack_ready && senses.hostile_in_attack {
            Transition::To(EntityStateType::Attacking)
        } else if !senses.hostile_in_disengage {
            tracing::debug!("{} ({}) lost its target", owner.name(), owner.id());
            Transition::To(EntityStateType::Idle)
        } else {
            Transition::Stay
        }
    }
}

struct EnemyAttacking {
    window: AttackWindow,
}

impl State<EntityStateType, EntityBody> for EnemyAttacking {
    fn enter(&mut self, owner: &mut EntityBody) {
        self.window.open(owner);
    }

    fn update(&mut self, owner: &mut EntityBody) -> Transition<EntityStateType> {
        if self.window.advance(owner) {
            Transition::To(EntityStateType::Combat)
        } else {
            Transition::Stay
        }
    }

    fn exit(&mut self, owner: &mut EntityBody) {
        self.window.close(owner);
        if let Some(brain) = owner.brain_mut() {
            brain.start_cooldown();
        }
    }
}
