//! Player-controlled entities.
//!
//! Players react to the host's trigger edge instead of a think timer: a
//! fresh press in Combat starts an attack, and a press in Idle is enough to
//! enter Combat even with nothing in sight.

use state_machine::{State, Transition};

use super::states::{AttackWindow, EntityMachine};
use super::{EntityBody, EntityId, EntityStateType, Senses};
use crate::config::PlayerConfig;
use crate::env::CombatEnv;

/// Player-specific data carried in [`Role::Player`](super::Role::Player).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerControl {
    pub tuning: PlayerConfig,
}

impl PlayerControl {
    pub fn new(tuning: PlayerConfig) -> Self {
        Self { tuning }
    }

    pub(crate) fn sense(&self, id: EntityId, env: &CombatEnv<'_>) -> Senses {
        Senses {
            hostile_in_detection: env.hostile_within(id, self.tuning.detection_range),
            hostile_in_attack: false,
            hostile_in_disengage: env.hostile_within(id, self.tuning.disengage_range),
            trigger_pressed: env.trigger_just_pressed(id),
            think_ready: true,
            attack_ready: true,
        }
    }
}

pub(crate) fn register_states(fsm: &mut EntityMachine, tuning: &PlayerConfig) {
    fsm.add_state(EntityStateType::Idle, PlayerIdle);
    fsm.add_state(EntityStateType::Combat, PlayerCombat);
    fsm.add_state(
        EntityStateType::Attacking,
        PlayerAttacking {
            window: AttackWindow::new(tuning.attack_duration),
        },
    );
}

struct PlayerIdle;

impl State<EntityStateType, EntityBody> for PlayerIdle {
    fn update(&mut self, owner: &mut EntityBody) -> Transition<EntityStateType> {
        let senses = owner.senses();
        if senses.hostile_in_detection || senses.trigger_pressed {
            Transition::To(EntityStateType::Combat)
        } else {
            Transition::Stay
        }
    }
}

struct PlayerCombat;

impl State<EntityStateType, EntityBody> for PlayerCombat {
    fn update(&mut self, owner: &mut EntityBody) -> Transition<EntityStateType> {
        let senses = owner.senses();
        if senses.trigger_pressed {
            Transition::To(EntityStateType::Attacking)
        } else if !senses.hostile_in_disengage {
            Transition::To(EntityStateType::Idle)
        } else {
            Transition::Stay
        }
    }
}

struct PlayerAttacking {
    window: AttackWindow,
}

impl State<EntityStateType, EntityBody> for PlayerAttacking {
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
    }
}
