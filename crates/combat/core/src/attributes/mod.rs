//! Attribute system - base values, timed modifiers, and recomputation.
//!
//! # Architecture
//!
//! ```text
//! [ Base values (externally set) ]
//!      ↓
//! [ Add pass      ]  list order, summed onto the running value
//!      ↓
//! [ Multiply pass ]  list order, compounding
//!      ↓
//! [ Override pass ]  list order, last write wins
//!      ↓
//! [ Current values ]
//! ```
//!
//! ## Principles
//!
//! 1. **Derivable**: current values are always a replay of base + live modifiers
//! 2. **Escape hatch**: [`AttributeStore::set_current_direct`] may break (1)
//!    until the next recomputation (used for health loss)
//! 3. **Fail-soft**: missing attributes read as 0

pub mod modifier;
pub mod store;
pub mod types;

pub use modifier::{Modifier, ModifierId};
pub use store::AttributeStore;
pub use types::{AttributeType, ModifierType};
