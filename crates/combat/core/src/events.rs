//! Outbound combat events.
//!
//! Entities, the manager and the facade each buffer events as they happen.
//! The facade collects them into one ordered log per tick which the host
//! drains with [`CombatFacade::drain_events`](crate::CombatFacade::drain_events).

use crate::damage::{DamageRecord, DamageType};
use crate::entity::{EntityId, EntityStateType, EntityType};
use crate::phase::CombatStateType;

#[derive(Clone, Debug, PartialEq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CombatEvent {
    EntitySpawned {
        entity: EntityId,
        entity_type: EntityType,
    },
    EntityRemoved {
        entity: EntityId,
    },
    /// `from` is [`EntityStateType::None`] for the initial Idle entry.
    StateChanged {
        entity: EntityId,
        from: EntityStateType,
        to: EntityStateType,
    },
    AttackStarted {
        entity: EntityId,
    },
    AttackFinished {
        entity: EntityId,
    },
    CastStarted {
        entity: EntityId,
        duration: f32,
    },
    CastFinished {
        entity: EntityId,
    },
    /// Health actually removed by an entity's damage intake.
    ///
    /// `damage_type` is `None` for the untyped intake path.
    Damaged {
        target: EntityId,
        source: Option<EntityId>,
        amount: f32,
        damage_type: Option<DamageType>,
        is_critical: bool,
        remaining_health: f32,
    },
    /// Output of the damage resolver. Not applied to anyone by itself.
    DamageResolved(DamageRecord),
    Healed {
        entity: EntityId,
        amount: f32,
    },
    Died {
        entity: EntityId,
        killer: Option<EntityId>,
    },
    /// A player died. Signals the end of the game for that player.
    PlayerDefeated {
        entity: EntityId,
    },
    EnemyDefeated {
        entity: EntityId,
        killer: Option<EntityId>,
    },
    PhaseChanged {
        from: CombatStateType,
        to: CombatStateType,
    },
}

impl CombatEvent {
    /// Variant name in snake_case, for logs and counters.
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Primary entity this event concerns, if any.
    pub fn entity(&self) -> Option<EntityId> {
        match self {
            Self::EntitySpawned { entity, .. }
            | Self::EntityRemoved { entity }
            | Self::StateChanged { entity, .. }
            | Self::AttackStarted { entity }
            | Self::AttackFinished { entity }
            | Self::CastStarted { entity, .. }
            | Self::CastFinished { entity }
            | Self::Healed { entity, .. }
            | Self::Died { entity, .. }
            | Self::PlayerDefeated { entity }
            | Self::EnemyDefeated { entity, .. } => Some(*entity),
            Self::Damaged { target, .. } => Some(*target),
            Self::DamageResolved(record) => Some(record.target_id),
            Self::PhaseChanged { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_is_snake_case_variant_name() {
        let event = CombatEvent::PhaseChanged {
            from: CombatStateType::Idle,
            to: CombatStateType::Preparing,
        };
        assert_eq!(event.kind(), "phase_changed");
        assert_eq!(
            CombatEvent::AttackStarted { entity: EntityId(1) }.kind(),
            "attack_started"
        );
    }

    #[test]
    fn damage_events_concern_their_target() {
        let event = CombatEvent::Damaged {
            target: EntityId(4),
            source: Some(EntityId(2)),
            amount: 3.0,
            damage_type: None,
            is_critical: false,
            remaining_health: 7.0,
        };
        assert_eq!(event.entity(), Some(EntityId(4)));
        assert_eq!(
            CombatEvent::PhaseChanged {
                from: CombatStateType::Combat,
                to: CombatStateType::Ending,
            }
            .entity(),
            None
        );
    }
}
