//! State container keyed by state identifier.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::{State, Transition};

/// Result of a transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome<Id> {
    /// The machine exited `from` (if any) and entered `to`.
    Changed { from: Option<Id>, to: Id },

    /// The requested state was already current; nothing happened.
    Unchanged,

    /// The requested state was never registered; nothing happened.
    Unregistered(Id),
}

impl<Id> ChangeOutcome<Id> {
    /// Returns `true` if the current state actually changed.
    #[inline]
    pub fn is_changed(&self) -> bool {
        matches!(self, ChangeOutcome::Changed { .. })
    }
}

/// Finite state machine owning its registered states.
///
/// The owner is not stored. Callers pass it to every operation that can
/// invoke state callbacks, which keeps the owner free to hold the machine
/// in a sibling field.
///
/// # Invariant
///
/// Once a state has been entered, `current_state()` always names a
/// registered state. Requests for unregistered ids are rejected.
pub struct StateMachine<Id, O: ?Sized> {
    states: HashMap<Id, Box<dyn State<Id, O>>>,
    current: Option<Id>,
}

impl<Id, O> StateMachine<Id, O>
where
    Id: Copy + Eq + Hash + fmt::Debug,
    O: ?Sized,
{
    /// Creates an empty machine with no current state.
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            current: None,
        }
    }

    /// Registers a state, replacing any previous registration for `id`.
    ///
    /// Replacing the current state's object does not run Enter or Exit.
    pub fn add_state(&mut self, id: Id, state: impl State<Id, O> + 'static) {
        self.states.insert(id, Box::new(state));
    }

    /// Returns the current state id, or `None` before the first transition.
    pub fn current_state(&self) -> Option<Id> {
        self.current
    }

    /// Returns `true` if the current state is `id`.
    pub fn is_in(&self, id: Id) -> bool {
        self.current == Some(id)
    }

    /// Returns `true` if `id` has been registered.
    pub fn has_state(&self, id: Id) -> bool {
        self.states.contains_key(&id)
    }

    /// Number of registered states.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Switches to `id`.
    ///
    /// - Unregistered `id`: warning, state unchanged, no callbacks.
    /// - `id` already current: no callbacks.
    /// - Otherwise: `exit` on the old state, then `enter` on the new one.
    pub fn change_state(&mut self, id: Id, owner: &mut O) -> ChangeOutcome<Id> {
        if !self.states.contains_key(&id) {
            tracing::warn!("State {:?} is not registered; transition ignored", id);
            return ChangeOutcome::Unregistered(id);
        }
        if self.current == Some(id) {
            return ChangeOutcome::Unchanged;
        }

        let from = self.current;
        if let Some(old) = from.and_then(|old| self.states.get_mut(&old)) {
            old.exit(owner);
        }

        self.current = Some(id);
        if let Some(new) = self.states.get_mut(&id) {
            new.enter(owner);
        }

        ChangeOutcome::Changed { from, to: id }
    }

    /// Runs `update` on the current state only.
    ///
    /// If the state requests a transition it is applied before returning and
    /// its outcome is reported. Returns `None` when the state stayed put or no
    /// state has been entered yet.
    pub fn update(&mut self, owner: &mut O) -> Option<ChangeOutcome<Id>> {
        let current = self.current?;
        let transition = self.states.get_mut(&current)?.update(owner);

        match transition {
            Transition::Stay => None,
            Transition::To(next) => Some(self.change_state(next, owner)),
        }
    }
}

impl<Id, O> Default for StateMachine<Id, O>
where
    Id: Copy + Eq + Hash + fmt::Debug,
    O: ?Sized,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: fmt::Debug, O: ?Sized> fmt::Debug for StateMachine<Id, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Light {
        Red,
        Green,
        Yellow,
        Broken,
    }

    #[derive(Default)]
    struct Log {
        entered: Vec<Light>,
        exited: Vec<Light>,
        ticks: u32,
    }

    struct Recording(Light);
    impl State<Light, Log> for Recording {
        fn enter(&mut self, log: &mut Log) {
            log.entered.push(self.0);
        }

        fn exit(&mut self, log: &mut Log) {
            log.exited.push(self.0);
        }
    }

    struct AdvanceAfter {
        ticks: u32,
        next: Light,
    }
    impl State<Light, Log> for AdvanceAfter {
        fn enter(&mut self, log: &mut Log) {
            log.entered.push(Light::Green);
        }

        fn update(&mut self, log: &mut Log) -> Transition<Light> {
            log.ticks += 1;
            if log.ticks >= self.ticks {
                Transition::To(self.next)
            } else {
                Transition::Stay
            }
        }
    }

    fn machine() -> StateMachine<Light, Log> {
        let mut fsm = StateMachine::new();
        fsm.add_state(Light::Red, Recording(Light::Red));
        fsm.add_state(Light::Yellow, Recording(Light::Yellow));
        fsm
    }

    #[test]
    fn first_transition_enters_without_exit() {
        let mut fsm = machine();
        let mut log = Log::default();

        let outcome = fsm.change_state(Light::Red, &mut log);

        assert_eq!(
            outcome,
            ChangeOutcome::Changed {
                from: None,
                to: Light::Red
            }
        );
        assert_eq!(log.entered, vec![Light::Red]);
        assert!(log.exited.is_empty());
    }

    #[test]
    fn transition_exits_old_then_enters_new() {
        let mut fsm = machine();
        let mut log = Log::default();
        fsm.change_state(Light::Red, &mut log);

        fsm.change_state(Light::Yellow, &mut log);

        assert_eq!(log.exited, vec![Light::Red]);
        assert_eq!(log.entered, vec![Light::Red, Light::Yellow]);
        assert!(fsm.is_in(Light::Yellow));
    }

    #[test]
    fn unregistered_target_is_rejected_without_callbacks() {
        let mut fsm = machine();
        let mut log = Log::default();
        fsm.change_state(Light::Red, &mut log);

        let outcome = fsm.change_state(Light::Broken, &mut log);

        assert_eq!(outcome, ChangeOutcome::Unregistered(Light::Broken));
        assert_eq!(fsm.current_state(), Some(Light::Red));
        assert_eq!(log.entered, vec![Light::Red]);
        assert!(log.exited.is_empty());
    }

    #[test]
    fn same_state_is_a_no_op() {
        let mut fsm = machine();
        let mut log = Log::default();
        fsm.change_state(Light::Red, &mut log);

        assert_eq!(fsm.change_state(Light::Red, &mut log), ChangeOutcome::Unchanged);
        assert_eq!(log.entered.len(), 1);
    }

    #[test]
    fn update_applies_requested_transition_synchronously() {
        let mut fsm = machine();
        fsm.add_state(
            Light::Green,
            AdvanceAfter {
                ticks: 2,
                next: Light::Yellow,
            },
        );
        let mut log = Log::default();
        fsm.change_state(Light::Green, &mut log);

        assert_eq!(fsm.update(&mut log), None);
        let outcome = fsm.update(&mut log);

        assert_eq!(
            outcome,
            Some(ChangeOutcome::Changed {
                from: Some(Light::Green),
                to: Light::Yellow
            })
        );
        assert!(fsm.is_in(Light::Yellow));
    }

    #[test]
    fn update_before_any_state_does_nothing() {
        let mut fsm = machine();
        let mut log = Log::default();

        assert_eq!(fsm.update(&mut log), None);
        assert_eq!(fsm.current_state(), None);
    }

    #[test]
    fn re_registering_replaces_state_object() {
        let mut fsm = machine();
        fsm.add_state(Light::Red, Recording(Light::Broken));
        let mut log = Log::default();

        fsm.change_state(Light::Red, &mut log);

        assert_eq!(fsm.state_count(), 2);
        assert_eq!(log.entered, vec![Light::Broken]);
    }
}
