use super::types::DamageType;
use crate::entity::EntityId;

/// Snapshot of a single damage resolution.
///
/// Informational only: the core never reads it back. The facade forwards
/// records as [`CombatEvent::DamageResolved`](crate::CombatEvent::DamageResolved).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRecord {
    /// Raw damage after the critical multiplier, before reduction.
    pub original_value: f32,
    /// Damage after reduction and the minimum-damage floor.
    pub final_value: f32,
    pub damage_type: DamageType,
    pub is_critical: bool,
    pub source_id: EntityId,
    pub target_id: EntityId,
}

impl DamageRecord {
    /// Damage prevented by the defender's reduction curve.
    ///
    /// Negative when the minimum-damage floor raised the result.
    pub fn mitigated(&self) -> f32 {
        self.original_value - self.final_value
    }
}
