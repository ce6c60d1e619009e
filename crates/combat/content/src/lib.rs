//! Data-driven combat content and loaders.
//!
//! This crate reads tuning and rosters from data files:
//! - Combat tuning (`CombatConfig`, TOML)
//! - Entity rosters (`Vec<EntityData>`, RON)
//!
//! All loaders deserialize combat-core types directly through its `serde`
//! feature, so there is no separate file format layer to keep in sync.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, RosterLoader};
