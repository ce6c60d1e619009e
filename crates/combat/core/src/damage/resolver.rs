//! Damage calculation from attacker/defender attribute snapshots.

use super::record::DamageRecord;
use super::roll::RollSource;
use super::types::DamageType;
use crate::attributes::{AttributeStore, AttributeType};
use crate::entity::{Entity, EntityId};

/// One side of a damage resolution: an identity plus its attributes.
#[derive(Clone, Copy, Debug)]
pub struct DamageParticipant<'a> {
    pub id: EntityId,
    pub attributes: &'a AttributeStore,
}

impl<'a> DamageParticipant<'a> {
    pub fn new(id: EntityId, attributes: &'a AttributeStore) -> Self {
        Self { id, attributes }
    }
}

impl<'a> From<&'a Entity> for DamageParticipant<'a> {
    fn from(entity: &'a Entity) -> Self {
        Self::new(entity.id(), entity.attributes())
    }
}

/// Stateless damage resolver.
pub struct DamageResolver;

impl DamageResolver {
    /// Final damage never drops below this.
    pub const MIN_DAMAGE: f32 = 1.0;

    /// Denominator offset of every reduction curve.
    pub const REDUCTION_CONSTANT: f32 = 100.0;

    /// Share of defense that counts as magical resistance.
    pub const MAGIC_RESIST_RATIO: f32 = 0.5;

    /// Resolve damage and return only the final value.
    ///
    /// Returns 0 when either participant is absent.
    pub fn resolve(
        attacker: Option<DamageParticipant<'_>>,
        defender: Option<DamageParticipant<'_>>,
        base_damage: f32,
        attack_multiplier: f32,
        damage_type: DamageType,
        rolls: &mut impl RollSource,
    ) -> f32 {
        Self::resolve_record(
            attacker,
            defender,
            base_damage,
            attack_multiplier,
            damage_type,
            rolls,
        )
        .map_or(0.0, |record| record.final_value)
    }

    /// Resolve damage and return the full record.
    ///
    /// # Formula
    ///
    /// ```text
    /// raw = base_damage + attacker.Attack * attack_multiplier
    /// if roll <= attacker.Critical / 100:
    ///     raw *= 1 + attacker.CritDamage / 100
    /// final = max(MIN_DAMAGE, raw * (1 - reduction(damage_type, defender.Defense)))
    /// ```
    ///
    /// Returns `None` (and consumes no roll) when either participant is absent.
    pub fn resolve_record(
        attacker: Option<DamageParticipant<'_>>,
        defender: Option<DamageParticipant<'_>>,
        base_damage: f32,
        attack_multiplier: f32,
        damage_type: DamageType,
        rolls: &mut impl RollSource,
    ) -> Option<DamageRecord> {
        let (attacker, defender) = (attacker?, defender?);
        let offense = attacker.attributes;

        let mut raw_damage = base_damage + offense.current(AttributeType::Attack) * attack_multiplier;

        let crit_chance = offense.current(AttributeType::Critical) / 100.0;
        let is_critical = rolls.roll_unit() <= crit_chance;
        if is_critical {
            raw_damage *= 1.0 + offense.current(AttributeType::CritDamage) / 100.0;
        }

        let defense = defender.attributes.current(AttributeType::Defense);
        let reduction = Self::reduction_for(damage_type, defense);
        let final_damage = (raw_damage * (1.0 - reduction)).max(Self::MIN_DAMAGE);

        tracing::debug!(
            "Resolved {} damage {} -> {}: raw={:.2} final={:.2} crit={}",
            damage_type,
            attacker.id,
            defender.id,
            raw_damage,
            final_damage,
            is_critical
        );

        Some(DamageRecord {
            original_value: raw_damage,
            final_value: final_damage,
            damage_type,
            is_critical,
            source_id: attacker.id,
            target_id: defender.id,
        })
    }

    /// Fraction of damage removed for `damage_type` against `defense`.
    ///
    /// Negative defense counts as zero.
    pub fn reduction_for(damage_type: DamageType, defense: f32) -> f32 {
        let defense = defense.max(0.0);
        match damage_type {
            DamageType::True => 0.0,
            DamageType::Magical => {
                let resist = defense * Self::MAGIC_RESIST_RATIO;
                resist / (resist + Self::REDUCTION_CONSTANT)
            }
            DamageType::Physical
            | DamageType::Fire
            | DamageType::Ice
            | DamageType::Lightning
            | DamageType::Magic
            | DamageType::Energy => defense / (defense + Self::REDUCTION_CONSTANT),
        }
    }
}
