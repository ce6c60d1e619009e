use crate::manager::EntityManager;
use crate::phase::CombatStateType;

/// External manager ticked by the facade alongside entities.
///
/// Skills, status effects and projectiles live outside this crate. They plug
/// in here and receive the same gated tick as everything else.
///
/// # Execution Order
///
/// Subsystems run after entities and the phase controller, sorted by
/// priority (lower values first). Equal priorities keep attachment order.
pub trait CombatSubsystem {
    /// Human-readable name, used in logs and for detaching.
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    fn update(&mut self, delta_time: f32, entities: &mut EntityManager);

    fn on_phase_changed(&mut self, _from: CombatStateType, _to: CombatStateType) {}
}
