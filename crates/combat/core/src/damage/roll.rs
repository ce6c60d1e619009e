//! Uniform roll sources for critical-hit checks.
//!
//! Resolution never touches a global generator. Callers inject either any
//! [`rand::Rng`] (seed it for replays) or a [`FixedRoll`] for exact tests.

/// Source of uniform rolls in `[0, 1)`.
pub trait RollSource {
    fn roll_unit(&mut self) -> f32;
}

impl<R: rand::Rng> RollSource for R {
    fn roll_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Roll source that always returns the same value.
///
/// `FixedRoll(1.0)` never crits unless Critical is at least 100;
/// `FixedRoll(0.0)` crits whenever Critical is non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedRoll(pub f32);

impl FixedRoll {
    pub const NEVER_CRIT: Self = FixedRoll(1.0);
    pub const ALWAYS_CRIT: Self = FixedRoll(0.0);
}

impl RollSource for FixedRoll {
    fn roll_unit(&mut self) -> f32 {
        self.0
    }
}
