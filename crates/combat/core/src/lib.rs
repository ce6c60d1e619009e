//! Frame-driven combat simulation core.
//!
//! `combat-core` owns the rules of a real-time encounter: attribute stores with
//! stacking timed modifiers, per-entity state machines, a global combat phase,
//! and damage resolution. A host feeds it one delta time per frame plus a few
//! read-only oracles (proximity and input edges) and reads back entity state
//! and a stream of [`CombatEvent`]s.
//!
//! All mutation flows through [`CombatFacade`], which gates per-frame ticks on
//! the current combat phase. Lower layers ([`EntityManager`],
//! [`CombatPhaseController`], [`AttributeStore`]) are usable on their own.
pub mod attributes;
pub mod config;
pub mod damage;
pub mod entity;
pub mod env;
pub mod error;
pub mod events;
pub mod facade;
pub mod manager;
pub mod phase;
pub mod timer;

pub use attributes::{AttributeStore, AttributeType, Modifier, ModifierId, ModifierType};
pub use config::{ClockConfig, CombatConfig, EnemyAiConfig, PhaseConfig, PlayerConfig};
pub use damage::{DamageParticipant, DamageRecord, DamageResolver, DamageType, FixedRoll, RollSource};
pub use entity::{
    EnemyBrain, Entity, EntityBody, EntityData, EntityId, EntityStateType, EntityType,
    PlayerControl, Role, Senses,
};
pub use env::{CombatEnv, DistanceTable, InputOracle, PressedTriggers, ProximityOracle};
pub use error::{CombatError, CommandError, ConfigError, EntityDataError, ErrorSeverity};
pub use events::CombatEvent;
pub use facade::{CombatFacade, CombatOutcome, CombatSubsystem, FrameClock};
pub use manager::EntityManager;
pub use phase::{CombatPhaseController, CombatStateType};
pub use timer::{Countdown, Interval, Scheduler, TaskId};
