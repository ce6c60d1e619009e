/// Damage classification selecting the reduction curve.
///
/// Only Physical, Magical and True have their own curves. Every other type
/// uses the Physical curve.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum DamageType {
    /// Reduced by `defense / (defense + 100)`.
    #[default]
    Physical,
    /// Reduced by half of defense on the same curve.
    Magical,
    /// Ignores defense entirely.
    True,
    Fire,
    Ice,
    Lightning,
    Magic,
    Energy,
}
