use std::collections::HashSet;

use crate::entity::EntityId;

/// Edge-triggered input owned by the host.
pub trait InputOracle: Send + Sync {
    /// `true` only on the frame the trigger went down.
    fn trigger_just_pressed(&self, entity: EntityId) -> bool;
}

/// Set of entities whose trigger went down this frame.
///
/// The host clears it after each frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PressedTriggers {
    pressed: HashSet<EntityId>,
}

impl PressedTriggers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, entity: EntityId) {
        self.pressed.insert(entity);
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }
}

impl InputOracle for PressedTriggers {
    fn trigger_just_pressed(&self, entity: EntityId) -> bool {
        self.pressed.contains(&entity)
    }
}
