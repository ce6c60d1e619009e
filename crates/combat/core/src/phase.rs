//! Global combat phase.
//!
//! A second state machine, independent of any entity, that tracks where the
//! encounter as a whole stands:
//!
//! ```text
//! Idle ──start──▶ Preparing ──(preparing_duration)──▶ Combat ──end──▶ Ending
//!   ▲                                                                   │
//!   └──────────────────────────(ending_duration)────────────────────────┘
//! ```
//!
//! Only Preparing and Ending advance on their own. Every transition resets
//! the elapsed-time counter and is announced to the registered listeners.

use state_machine::{ChangeOutcome, State, StateMachine, Transition};

use crate::config::PhaseConfig;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombatStateType {
    #[default]
    Idle,
    Preparing,
    Combat,
    Ending,
}

impl CombatStateType {
    /// Phases during which the facade forwards frame ticks.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Preparing | Self::Combat)
    }
}

/// Owner handed to phase states: time spent in the current phase.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct PhaseClock {
    elapsed: f32,
}

/// Phase that never leaves on its own.
struct OpenPhase;

impl State<CombatStateType, PhaseClock> for OpenPhase {}

/// Phase that moves to `next` once `duration` seconds have elapsed.
struct TimedPhase {
    duration: f32,
    next: CombatStateType,
}

impl State<CombatStateType, PhaseClock> for TimedPhase {
    fn update(&mut self, owner: &mut PhaseClock) -> Transition<CombatStateType> {
        if owner.elapsed >= self.duration {
            Transition::To(self.next)
        } else {
            Transition::Stay
        }
    }
}

type PhaseListener = Box<dyn FnMut(CombatStateType, CombatStateType)>;

pub struct CombatPhaseController {
    fsm: StateMachine<CombatStateType, PhaseClock>,
    clock: PhaseClock,
    listeners: Vec<PhaseListener>,
}

impl CombatPhaseController {
    /// Creates a controller resting in Idle. No listener is notified for the
    /// initial state.
    pub fn new(config: PhaseConfig) -> Self {
        let mut fsm = StateMachine::new();
        fsm.add_state(CombatStateType::Idle, OpenPhase);
        fsm.add_state(
            CombatStateType::Preparing,
            TimedPhase {
                duration: config.preparing_duration,
                next: CombatStateType::Combat,
            },
        );
        fsm.add_state(CombatStateType::Combat, OpenPhase);
        fsm.add_state(
            CombatStateType::Ending,
            TimedPhase {
                duration: config.ending_duration,
                next: CombatStateType::Idle,
            },
        );

        let mut clock = PhaseClock::default();
        fsm.change_state(CombatStateType::Idle, &mut clock);

        Self {
            fsm,
            clock,
            listeners: Vec::new(),
        }
    }

    pub fn current(&self) -> CombatStateType {
        self.fsm.current_state().unwrap_or_default()
    }

    /// Seconds spent in the current phase.
    pub fn elapsed(&self) -> f32 {
        self.clock.elapsed
    }

    pub fn is_active(&self) -> bool {
        self.current().is_active()
    }

    /// Switches phase. Returns `false` if `to` is already current.
    pub fn change_state(&mut self, to: CombatStateType) -> bool {
        let outcome = self.fsm.change_state(to, &mut self.clock);
        self.on_changed(outcome)
    }

    /// Accumulates time and applies the timed auto-transitions.
    pub fn update(&mut self, delta_time: f32) {
        self.clock.elapsed += delta_time;
        if let Some(outcome) = self.fsm.update(&mut self.clock) {
            self.on_changed(outcome);
        }
    }

    /// Registers `listener` to be called with `(from, to)` on every transition.
    pub fn add_listener(&mut self, listener: impl FnMut(CombatStateType, CombatStateType) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn on_changed(&mut self, outcome: ChangeOutcome<CombatStateType>) -> bool {
        let ChangeOutcome::Changed { from, to } = outcome else {
            return false;
        };
        let from = from.unwrap_or_default();

        self.clock.elapsed = 0.0;
        tracing::info!("Combat phase {} -> {}", from, to);
        for listener in &mut self.listeners {
            listener(from, to);
        }
        true
    }
}

impl Default for CombatPhaseController {
    fn default() -> Self {
        Self::new(PhaseConfig::default())
    }
}

impl core::fmt::Debug for CombatPhaseController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatPhaseController")
            .field("current", &self.current())
            .field("elapsed", &self.clock.elapsed)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(
        controller: &mut CombatPhaseController,
    ) -> Rc<RefCell<Vec<(CombatStateType, CombatStateType)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        controller.add_listener(move |from, to| sink.borrow_mut().push((from, to)));
        log
    }

    #[test]
    fn starts_idle_without_notification() {
        let mut controller = CombatPhaseController::default();
        let log = recorder(&mut controller);

        assert_eq!(controller.current(), CombatStateType::Idle);
        assert!(!controller.is_active());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn idle_never_advances_on_its_own() {
        let mut controller = CombatPhaseController::default();
        for _ in 0..100 {
            controller.update(1.0);
        }
        assert_eq!(controller.current(), CombatStateType::Idle);
    }

    #[test]
    fn preparing_becomes_combat_exactly_once() {
        let mut controller = CombatPhaseController::default();
        let log = recorder(&mut controller);

        assert!(controller.change_state(CombatStateType::Preparing));
        for _ in 0..4 {
            controller.update(0.5);
        }
        assert_eq!(controller.current(), CombatStateType::Combat);
        assert_eq!(controller.elapsed(), 0.0);

        for _ in 0..10 {
            controller.update(0.5);
        }

        assert_eq!(
            *log.borrow(),
            vec![
                (CombatStateType::Idle, CombatStateType::Preparing),
                (CombatStateType::Preparing, CombatStateType::Combat),
            ]
        );
        assert_eq!(controller.elapsed(), 5.0);
    }

    #[test]
    fn preparing_waits_for_full_duration() {
        let mut controller = CombatPhaseController::default();
        controller.change_state(CombatStateType::Preparing);

        controller.update(1.5);
        assert_eq!(controller.current(), CombatStateType::Preparing);
        controller.update(0.5);
        assert_eq!(controller.current(), CombatStateType::Combat);
    }

    #[test]
    fn ending_returns_to_idle() {
        let mut controller = CombatPhaseController::default();
        controller.change_state(CombatStateType::Ending);

        controller.update(2.5);
        assert_eq!(controller.current(), CombatStateType::Ending);
        controller.update(0.5);
        assert_eq!(controller.current(), CombatStateType::Idle);
    }

    #[test]
    fn same_phase_request_is_a_noop() {
        let mut controller = CombatPhaseController::default();
        let log = recorder(&mut controller);
        controller.change_state(CombatStateType::Combat);
        controller.update(1.0);

        assert!(!controller.change_state(CombatStateType::Combat));
        assert_eq!(controller.elapsed(), 1.0);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn custom_durations_are_honoured() {
        let mut controller = CombatPhaseController::new(PhaseConfig {
            preparing_duration: 0.5,
            ending_duration: 1.0,
        });
        controller.change_state(CombatStateType::Preparing);
        controller.update(0.5);
        assert_eq!(controller.current(), CombatStateType::Combat);
    }
}
