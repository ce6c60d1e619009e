//! Core state trait.
//!
//! This module defines the [`State`] trait, the capability every state object
//! implements. The trait is generic over the state identifier `Id` and the
//! owner type `O`, so the same machinery serves entities and phase
//! controllers alike.

/// What a state's `update` asks the machine to do after it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition<Id> {
    /// Remain in the current state.
    Stay,

    /// Switch to the given state before `update` returns.
    To(Id),
}

impl<Id> Transition<Id> {
    /// Returns `true` if this transition keeps the current state.
    #[inline]
    pub fn is_stay(&self) -> bool {
        matches!(self, Transition::Stay)
    }
}

impl<Id> Default for Transition<Id> {
    fn default() -> Self {
        Transition::Stay
    }
}

/// A single state registered in a [`StateMachine`](crate::StateMachine).
///
/// All callbacks default to no-ops so implementors override only what they
/// need.
pub trait State<Id, O: ?Sized> {
    /// Called when the machine switches into this state.
    fn enter(&mut self, _owner: &mut O) {}

    /// Called once per machine update while this state is current.
    ///
    /// Returning [`Transition::To`] performs the switch synchronously,
    /// inside the same `update` call.
    fn update(&mut self, _owner: &mut O) -> Transition<Id> {
        Transition::Stay
    }

    /// Called when the machine switches away from this state.
    fn exit(&mut self, _owner: &mut O) {}
}

/// Blanket implementation for boxed states.
///
/// This allows `Box<dyn State<Id, O>>` to also implement `State<Id, O>`.
impl<Id, O: ?Sized> State<Id, O> for Box<dyn State<Id, O>> {
    #[inline]
    fn enter(&mut self, owner: &mut O) {
        (**self).enter(owner)
    }

    #[inline]
    fn update(&mut self, owner: &mut O) -> Transition<Id> {
        (**self).update(owner)
    }

    #[inline]
    fn exit(&mut self, owner: &mut O) {
        (**self).exit(owner)
    }
}
