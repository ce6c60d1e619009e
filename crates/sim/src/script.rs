//! Scripted trigger presses standing in for a human player.

use std::collections::BTreeMap;

use combat_core::{EntityId, Interval, PressedTriggers};

/// Presses each player's trigger at that player's attack speed.
#[derive(Debug, Default)]
pub struct TriggerScript {
    cadence: BTreeMap<EntityId, Interval>,
}

impl TriggerScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// `attacks_per_second` at or below zero falls back to one press per second.
    pub fn add_player(&mut self, id: EntityId, attacks_per_second: f32) {
        let rate = if attacks_per_second > 0.0 {
            attacks_per_second
        } else {
            1.0
        };
        self.cadence.insert(id, Interval::new(1.0 / rate));
    }

    /// Advances every cadence and returns the presses for this frame.
    pub fn frame(&mut self, delta_time: f32) -> PressedTriggers {
        let mut pressed = PressedTriggers::new();
        for (&id, interval) in &mut self.cadence {
            if interval.tick(delta_time) {
                pressed.press(id);
            }
        }
        pressed
    }
}
