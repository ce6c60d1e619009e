//! Timed or permanent adjustments to a single attribute.

use super::types::{AttributeType, ModifierType};

/// Handle identifying a modifier inside one [`AttributeStore`](super::AttributeStore).
///
/// Handles are assigned sequentially per store and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierId(pub u32);

/// A single adjustment applied during recomputation.
///
/// A `duration` of zero or less makes the modifier permanent. Otherwise
/// `remaining` counts down on every store tick and the modifier is pruned once
/// it reaches zero.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub attribute: AttributeType,
    pub kind: ModifierType,
    pub value: f32,
    pub duration: f32,
    pub remaining: f32,
}

impl Modifier {
    /// Creates a modifier whose remaining time starts at `duration`.
    pub fn new(attribute: AttributeType, kind: ModifierType, value: f32, duration: f32) -> Self {
        Self {
            attribute,
            kind,
            value,
            duration,
            remaining: duration,
        }
    }

    /// Permanent `current += value`.
    pub fn add(attribute: AttributeType, value: f32) -> Self {
        Self::new(attribute, ModifierType::Add, value, 0.0)
    }

    /// Permanent `current *= value`.
    pub fn multiply(attribute: AttributeType, value: f32) -> Self {
        Self::new(attribute, ModifierType::Multiply, value, 0.0)
    }

    /// Permanent `current = value`.
    pub fn override_to(attribute: AttributeType, value: f32) -> Self {
        Self::new(attribute, ModifierType::Override, value, 0.0)
    }

    /// Returns a copy that expires after `duration` seconds.
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self.remaining = duration;
        self
    }

    pub fn is_permanent(&self) -> bool {
        self.duration <= 0.0
    }

    /// Returns true once a timed modifier has run out.
    pub fn is_expired(&self) -> bool {
        !self.is_permanent() && self.remaining <= 0.0
    }
}
