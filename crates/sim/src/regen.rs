use combat_core::{CombatStateType, CombatSubsystem, EntityManager, EntityType, Interval};

/// Heals every living player a fixed amount once per second of combat.
pub struct RegenSubsystem {
    per_pulse: f32,
    pulse: Interval,
}

impl RegenSubsystem {
    pub fn new(per_second: f32) -> Self {
        Self {
            per_pulse: per_second,
            pulse: Interval::new(1.0),
        }
    }
}

impl CombatSubsystem for RegenSubsystem {
    fn name(&self) -> &'static str {
        "regen"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn update(&mut self, delta_time: f32, entities: &mut EntityManager) {
        if !self.pulse.tick(delta_time) {
            return;
        }
        for id in entities.ids_of_type(EntityType::Player) {
            if let Some(player) = entities.entity_mut(id) {
                player.heal(self.per_pulse);
            }
        }
    }

    fn on_phase_changed(&mut self, _from: CombatStateType, to: CombatStateType) {
        if to == CombatStateType::Combat {
            self.pulse = Interval::new(self.pulse.period());
        }
    }
}
