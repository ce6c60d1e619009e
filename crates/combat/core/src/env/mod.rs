//! Traits describing read-only host data.
//!
//! The combat core never looks at positions or input devices itself. Once per
//! frame it asks the host a few yes/no questions through these oracles. The
//! [`CombatEnv`] aggregate bundles them so entity logic can query whatever is
//! available without hard coupling to concrete implementations.
mod input;
mod proximity;

pub use input::{InputOracle, PressedTriggers};
pub use proximity::{DistanceTable, ProximityOracle};

use crate::entity::EntityId;

/// Aggregates the read-only oracles consulted during an entity update.
///
/// Every oracle is optional. A missing oracle answers `false` to every query,
/// so an empty environment leaves AI and players idle.
#[derive(Clone, Copy, Default)]
pub struct CombatEnv<'a> {
    proximity: Option<&'a dyn ProximityOracle>,
    input: Option<&'a dyn InputOracle>,
}

impl<'a> CombatEnv<'a> {
    pub fn new(
        proximity: Option<&'a dyn ProximityOracle>,
        input: Option<&'a dyn InputOracle>,
    ) -> Self {
        Self { proximity, input }
    }

    pub fn with_all(proximity: &'a dyn ProximityOracle, input: &'a dyn InputOracle) -> Self {
        Self::new(Some(proximity), Some(input))
    }

    pub fn empty() -> Self {
        Self::new(None, None)
    }

    pub fn with_proximity(mut self, proximity: &'a dyn ProximityOracle) -> Self {
        self.proximity = Some(proximity);
        self
    }

    pub fn with_input(mut self, input: &'a dyn InputOracle) -> Self {
        self.input = Some(input);
        self
    }

    pub fn proximity(&self) -> Option<&'a dyn ProximityOracle> {
        self.proximity
    }

    pub fn input(&self) -> Option<&'a dyn InputOracle> {
        self.input
    }

    /// Is any hostile of `entity` within `range`?
    pub fn hostile_within(&self, entity: EntityId, range: f32) -> bool {
        self.proximity
            .is_some_and(|oracle| oracle.hostile_within(entity, range))
    }

    /// Did the host report a fresh trigger press for `entity` this frame?
    pub fn trigger_just_pressed(&self, entity: EntityId) -> bool {
        self.input
            .is_some_and(|oracle| oracle.trigger_just_pressed(entity))
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("proximity", &self.proximity.is_some())
            .field("input", &self.input.is_some())
            .finish()
    }
}
