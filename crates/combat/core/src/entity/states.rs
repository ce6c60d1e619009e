//! States shared by every entity variant.

use state_machine::{State, StateMachine, Transition};

use super::{EntityBody, EntityStateType};
use crate::events::CombatEvent;
use crate::timer::Countdown;

pub(crate) type EntityMachine = StateMachine<EntityStateType, EntityBody>;

pub(crate) fn register_shared_states(fsm: &mut EntityMachine) {
    fsm.add_state(EntityStateType::Dead, DeadState);
    fsm.add_state(EntityStateType::Stunned, StunnedState);
    fsm.add_state(EntityStateType::Casting, CastingState);
}

/// Terminal state. Nothing leaves Dead on its own.
pub struct DeadState;

impl State<EntityStateType, EntityBody> for DeadState {
    fn enter(&mut self, owner: &mut EntityBody) {
        tracing::debug!("{} ({}) died", owner.name(), owner.id());
    }
}

/// Counts down the body's stun timer, then returns to Combat.
pub struct StunnedState;

impl State<EntityStateType, EntityBody> for StunnedState {
    fn update(&mut self, owner: &mut EntityBody) -> Transition<EntityStateType> {
        let delta_time = owner.delta_time();
        owner.stun.tick(delta_time);
        if owner.stun.is_ready() {
            Transition::To(EntityStateType::Combat)
        } else {
            Transition::Stay
        }
    }

    fn exit(&mut self, owner: &mut EntityBody) {
        owner.stun.reset();
    }
}

/// Counts down the body's cast timer, then returns to Combat.
pub struct CastingState;

impl State<EntityStateType, EntityBody> for CastingState {
    fn enter(&mut self, owner: &mut EntityBody) {
        let event = CombatEvent::CastStarted {
            entity: owner.id(),
            duration: owner.cast_remaining(),
        };
        owner.emit(event);
    }

    fn update(&mut self, owner: &mut EntityBody) -> Transition<EntityStateType> {
        let delta_time = owner.delta_time();
        owner.cast.tick(delta_time);
        if owner.cast.is_ready() {
            Transition::To(EntityStateType::Combat)
        } else {
            Transition::Stay
        }
    }

    fn exit(&mut self, owner: &mut EntityBody) {
        owner.cast.reset();
        let entity = owner.id();
        owner.emit(CombatEvent::CastFinished { entity });
    }
}

/// Fixed-length attack window used by the variants' Attacking states.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AttackWindow {
    duration: f32,
    timer: Countdown,
}

impl AttackWindow {
    pub(crate) fn new(duration: f32) -> Self {
        Self {
            duration,
            timer: Countdown::ready(),
        }
    }

    pub(crate) fn open(&mut self, owner: &mut EntityBody) {
        self.timer.start(self.duration);
        let entity = owner.id();
        owner.emit(CombatEvent::AttackStarted { entity });
    }

    /// `true` once the window has run its full length.
    pub(crate) fn advance(&mut self, owner: &EntityBody) -> bool {
        self.timer.tick(owner.delta_time());
        self.timer.is_ready()
    }

    pub(crate) fn close(&mut self, owner: &mut EntityBody) {
        self.timer.reset();
        let entity = owner.id();
        owner.emit(CombatEvent::AttackFinished { entity });
    }
}
