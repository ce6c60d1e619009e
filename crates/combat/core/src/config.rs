use crate::error::{ConfigError, EntityDataError};

/// Combat configuration constants and tunable parameters.
///
/// Every section falls back to its defaults when omitted from a content file.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    pub phase: PhaseConfig,
    pub enemy_ai: EnemyAiConfig,
    pub player: PlayerConfig,
    pub clock: ClockConfig,
    /// Keep ticking the phase controller while Ending so it can return to Idle
    /// on its own. Off by default: the facade only forwards ticks while
    /// Preparing or Combat.
    pub drive_ending_phase: bool,
}

impl CombatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks every section for values the simulation cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in section order: phase durations,
    /// enemy AI tuning, then the frame clock.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("preparing_duration", self.phase.preparing_duration),
            ("ending_duration", self.phase.ending_duration),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidPhaseDuration { name, value });
            }
        }

        self.enemy_ai.validate()?;

        let max_delta = self.clock.max_delta;
        if !(max_delta.is_finite() && max_delta > 0.0) {
            return Err(ConfigError::InvalidMaxDelta(max_delta));
        }

        Ok(())
    }
}

/// Durations of the timed combat phases, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhaseConfig {
    /// Preparing → Combat after this long.
    pub preparing_duration: f32,
    /// Ending → Idle after this long.
    pub ending_duration: f32,
}

impl PhaseConfig {
    pub const DEFAULT_PREPARING_DURATION: f32 = 2.0;
    pub const DEFAULT_ENDING_DURATION: f32 = 3.0;
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            preparing_duration: Self::DEFAULT_PREPARING_DURATION,
            ending_duration: Self::DEFAULT_ENDING_DURATION,
        }
    }
}

/// Enemy AI tuning. Ranges are in world units, times in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EnemyAiConfig {
    /// AI decisions are re-evaluated on this fixed interval.
    pub think_interval: f32,
    /// Idle → Combat when a hostile comes this close.
    pub detection_range: f32,
    /// Combat → Attacking when a hostile is this close and the cooldown is ready.
    pub attack_range: f32,
    /// Combat → Idle when no hostile remains within this range.
    pub disengage_range: f32,
    /// Time between the end of one attack and the next.
    pub attack_cooldown: f32,
    /// Length of the attack window.
    pub attack_duration: f32,
}

impl EnemyAiConfig {
    pub const DEFAULT_THINK_INTERVAL: f32 = 0.2;
    pub const DEFAULT_DETECTION_RANGE: f32 = 8.0;
    pub const DEFAULT_ATTACK_RANGE: f32 = 2.0;
    pub const DEFAULT_DISENGAGE_RANGE: f32 = 12.0;
    pub const DEFAULT_ATTACK_COOLDOWN: f32 = 1.5;
    pub const DEFAULT_ATTACK_DURATION: f32 = 0.6;
}

impl EnemyAiConfig {
    /// Rejects a non-positive think interval and any range wider than the
    /// disengage range. Either makes an enemy flip between Idle and Combat.
    pub fn validate(&self) -> Result<(), EntityDataError> {
        if !(self.think_interval.is_finite() && self.think_interval > 0.0) {
            return Err(EntityDataError::InvalidThinkInterval(self.think_interval));
        }

        for (name, value) in [
            ("detection_range", self.detection_range),
            ("attack_range", self.attack_range),
        ] {
            if value > self.disengage_range {
                return Err(EntityDataError::RangeExceedsDisengage {
                    name,
                    value,
                    disengage: self.disengage_range,
                });
            }
        }

        Ok(())
    }
}

impl Default for EnemyAiConfig {
    fn default() -> Self {
        Self {
            think_interval: Self::DEFAULT_THINK_INTERVAL,
            detection_range: Self::DEFAULT_DETECTION_RANGE,
            attack_range: Self::DEFAULT_ATTACK_RANGE,
            disengage_range: Self::DEFAULT_DISENGAGE_RANGE,
            attack_cooldown: Self::DEFAULT_ATTACK_COOLDOWN,
            attack_duration: Self::DEFAULT_ATTACK_DURATION,
        }
    }
}

/// Player state tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlayerConfig {
    pub detection_range: f32,
    pub disengage_range: f32,
    /// Attacking → Combat after this long.
    pub attack_duration: f32,
}

impl PlayerConfig {
    pub const DEFAULT_DETECTION_RANGE: f32 = 8.0;
    pub const DEFAULT_DISENGAGE_RANGE: f32 = 12.0;
    pub const DEFAULT_ATTACK_DURATION: f32 = 0.4;
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            detection_range: Self::DEFAULT_DETECTION_RANGE,
            disengage_range: Self::DEFAULT_DISENGAGE_RANGE,
            attack_duration: Self::DEFAULT_ATTACK_DURATION,
        }
    }
}

/// Frame clock limits.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    /// Upper bound on a single frame's delta, in seconds.
    pub max_delta: f32,
}

impl ClockConfig {
    pub const DEFAULT_MAX_DELTA: f32 = 0.25;
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_delta: Self::DEFAULT_MAX_DELTA,
        }
    }
}
