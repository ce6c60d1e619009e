//! Attribute and modifier enumerations.

/// Numeric stat identity.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeType {
    /// Current hit points. Damage lowers this directly.
    Health,
    /// Upper bound for healing.
    MaxHealth,
    /// Flat attack power, scaled by the attack multiplier.
    Attack,
    /// Damage mitigation input for every reduction curve.
    Defense,
    /// Movement speed.
    Speed,
    /// Critical chance in percent (0-100).
    Critical,
    /// Bonus damage on a critical hit, in percent.
    CritDamage,
    /// Dodge chance in percent.
    Dodge,
    /// Attacks per second.
    AttackSpeed,
}

/// How a [`Modifier`](super::Modifier) combines with the running value.
///
/// Recomputation runs Add, then Multiply, then Override. `Additive` is part
/// of the contract but recomputation has no pass for it, so modifiers of this
/// kind never change any value.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierType {
    /// `current += value`
    Add,
    /// `current *= value`
    Multiply,
    /// `current = value`
    Override,
    /// Produced by [`AttributeStore::add_timed_value`](super::AttributeStore::add_timed_value).
    /// Not applied by recomputation.
    Additive,
}
