use std::collections::BTreeMap;

use super::EntityType;
use crate::attributes::AttributeType;
use crate::config::EnemyAiConfig;
use crate::error::EntityDataError;

/// Creation request for an entity.
///
/// Validated by [`CombatFacade::spawn`](crate::CombatFacade::spawn) and the
/// roster loader before any entity is built.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityData {
    pub name: String,
    pub entity_type: EntityType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub base_attributes: BTreeMap<AttributeType, f32>,
    #[cfg_attr(
        feature = "serde",
        serde(default = "EntityData::default_collision_radius")
    )]
    pub collision_radius: f32,
    /// Overrides the configured enemy AI tuning. Ignored for players.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: Option<EnemyAiConfig>,
}

impl EntityData {
    pub const DEFAULT_COLLISION_RADIUS: f32 = 0.5;

    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Self {
        Self {
            name: name.into(),
            entity_type,
            base_attributes: BTreeMap::new(),
            collision_radius: Self::DEFAULT_COLLISION_RADIUS,
            ai: None,
        }
    }

    pub fn player(name: impl Into<String>) -> Self {
        Self::new(name, EntityType::Player)
    }

    pub fn enemy(name: impl Into<String>) -> Self {
        Self::new(name, EntityType::Enemy)
    }

    pub fn with_attribute(mut self, attribute: AttributeType, value: f32) -> Self {
        self.base_attributes.insert(attribute, value);
        self
    }

    pub fn with_collision_radius(mut self, radius: f32) -> Self {
        self.collision_radius = radius;
        self
    }

    pub fn with_ai(mut self, ai: EnemyAiConfig) -> Self {
        self.ai = Some(ai);
        self
    }

    fn default_collision_radius() -> f32 {
        Self::DEFAULT_COLLISION_RADIUS
    }

    /// Checks the request without building anything.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: empty name, bad collision radius,
    /// non-finite attribute, or inconsistent AI ranges.
    pub fn validate(&self) -> Result<(), EntityDataError> {
        if self.name.trim().is_empty() {
            return Err(EntityDataError::EmptyName);
        }

        if !self.collision_radius.is_finite() || self.collision_radius < 0.0 {
            return Err(EntityDataError::InvalidCollisionRadius(
                self.collision_radius,
            ));
        }

        if let Some((&attribute, &value)) = self
            .base_attributes
            .iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(EntityDataError::NonFiniteAttribute { attribute, value });
        }

        if let Some(ai) = &self.ai {
            ai.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_produces_valid_data() {
        let data = EntityData::enemy("Goblin")
            .with_attribute(AttributeType::Health, 40.0)
            .with_collision_radius(0.3);

        assert_eq!(data.entity_type, EntityType::Enemy);
        assert_eq!(data.base_attributes[&AttributeType::Health], 40.0);
        assert_eq!(data.validate(), Ok(()));
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            EntityData::player("   ").validate(),
            Err(EntityDataError::EmptyName)
        );
    }

    #[test]
    fn negative_radius_is_rejected() {
        let data = EntityData::player("Hero").with_collision_radius(-1.0);
        assert_eq!(
            data.validate(),
            Err(EntityDataError::InvalidCollisionRadius(-1.0))
        );
    }

    #[test]
    fn non_finite_attribute_is_rejected() {
        let data = EntityData::player("Hero").with_attribute(AttributeType::Attack, f32::INFINITY);
        assert!(matches!(
            data.validate(),
            Err(EntityDataError::NonFiniteAttribute {
                attribute: AttributeType::Attack,
                ..
            })
        ));
    }

    #[test]
    fn ai_ranges_must_fit_inside_disengage_range() {
        let ai = EnemyAiConfig {
            attack_range: 20.0,
            ..EnemyAiConfig::default()
        };
        let data = EntityData::enemy("Archer").with_ai(ai);

        assert!(matches!(
            data.validate(),
            Err(EntityDataError::RangeExceedsDisengage {
                name: "attack_range",
                ..
            })
        ));
    }

    #[test]
    fn zero_think_interval_is_rejected() {
        let ai = EnemyAiConfig {
            think_interval: 0.0,
            ..EnemyAiConfig::default()
        };
        assert_eq!(
            EntityData::enemy("Slime").with_ai(ai).validate(),
            Err(EntityDataError::InvalidThinkInterval(0.0))
        );
    }
}
