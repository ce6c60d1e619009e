//! Damage resolution system.
//!
//! This module provides pure functions for resolving an attack between two
//! attribute snapshots. Nothing here mutates an entity: the caller decides
//! what to do with the resolved number.
//!
//! # Architecture
//!
//! - **Pure Functions**: [`DamageResolver`] reads attributes, never writes them
//! - **Injected randomness**: critical rolls come from a [`RollSource`]
//! - **Records**: every resolution yields a [`DamageRecord`] for observers
//!
//! Entity damage intake (`Entity::take_damage`) uses its own flat
//! `max(1, damage - defense)` formula and does not route through here.

pub mod record;
pub mod resolver;
pub mod roll;
pub mod types;

pub use record::DamageRecord;
pub use resolver::{DamageParticipant, DamageResolver};
pub use roll::{FixedRoll, RollSource};
pub use types::DamageType;
