//! Common error infrastructure for combat-core.
//!
//! The simulation itself is fail-soft: missing attributes read as zero,
//! rejected transitions only log, and removals of unknown ids are no-ops.
//! Typed errors exist only at the edges where a caller hands in data or an id
//! that cannot be honoured.

use crate::attributes::AttributeType;
use crate::entity::EntityId;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same request may succeed later (e.g. the entity has not spawned yet).
    Recoverable,

    /// Invalid input; retrying without changes will fail again.
    Validation,

    /// Unexpected state inconsistency. Indicates a bug.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all combat-core errors.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant (logging, metrics, tests).
    fn error_code(&self) -> &'static str;
}

/// Problems with an [`EntityData`](crate::EntityData) creation request.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EntityDataError {
    #[error("entity name must not be empty")]
    EmptyName,

    #[error("collision radius must be finite and non-negative, got {0}")]
    InvalidCollisionRadius(f32),

    #[error("attribute {attribute} has non-finite base value {value}")]
    NonFiniteAttribute { attribute: AttributeType, value: f32 },

    #[error("AI think interval must be positive, got {0}")]
    InvalidThinkInterval(f32),

    #[error("AI range {name} ({value}) exceeds disengage range ({disengage})")]
    RangeExceedsDisengage {
        name: &'static str,
        value: f32,
        disengage: f32,
    },
}

impl CombatError for EntityDataError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyName => "ENTITY_EMPTY_NAME",
            Self::InvalidCollisionRadius(_) => "ENTITY_INVALID_RADIUS",
            Self::NonFiniteAttribute { .. } => "ENTITY_NON_FINITE_ATTRIBUTE",
            Self::InvalidThinkInterval(_) => "ENTITY_INVALID_THINK_INTERVAL",
            Self::RangeExceedsDisengage { .. } => "ENTITY_RANGE_EXCEEDS_DISENGAGE",
        }
    }
}

/// Problems with a [`CombatConfig`](crate::CombatConfig).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("phase duration {name} must be finite and non-negative, got {value}")]
    InvalidPhaseDuration { name: &'static str, value: f32 },

    #[error("invalid enemy AI tuning: {0}")]
    InvalidEnemyAi(#[from] EntityDataError),

    #[error("clock max_delta must be finite and positive, got {0}")]
    InvalidMaxDelta(f32),
}

impl CombatError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPhaseDuration { .. } => "CONFIG_INVALID_PHASE_DURATION",
            Self::InvalidEnemyAi(_) => "CONFIG_INVALID_ENEMY_AI",
            Self::InvalidMaxDelta(_) => "CONFIG_INVALID_MAX_DELTA",
        }
    }
}

/// Errors surfaced by [`CombatFacade`](crate::CombatFacade) commands.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("entity {0} not found")]
    EntityNotFound(EntityId),

    #[error("invalid entity data: {0}")]
    InvalidEntityData(#[from] EntityDataError),
}

impl CombatError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EntityNotFound(_) => ErrorSeverity::Recoverable,
            Self::InvalidEntityData(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EntityNotFound(_) => "COMMAND_ENTITY_NOT_FOUND",
            Self::InvalidEntityData(inner) => inner.error_code(),
        }
    }
}
