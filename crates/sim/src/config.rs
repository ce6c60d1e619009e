//! Simulation run configuration.
use std::env;
use std::path::PathBuf;

/// Knobs for one headless run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    pub frames: u32,
    pub delta_time: f32,
    pub seed: u64,
    pub data_dir: PathBuf,
}

impl SimConfig {
    pub const DEFAULT_FRAMES: u32 = 1_800;
    pub const DEFAULT_DELTA_TIME: f32 = 1.0 / 30.0;
    pub const DEFAULT_SEED: u64 = 0x5EED;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_FRAMES` - Maximum frames to simulate (default: 1800)
    /// - `SIM_DT` - Seconds per frame (default: 1/30)
    /// - `SIM_SEED` - Seed for critical-hit rolls (default: 0x5EED)
    /// - `SIM_DATA_DIR` - Directory holding combat.toml and roster.ron
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(frames) = read_env::<u32>("SIM_FRAMES") {
            config.frames = frames.max(1);
        }

        if let Some(delta_time) = read_env::<f32>("SIM_DT").filter(|dt| *dt > 0.0) {
            config.delta_time = delta_time;
        }

        if let Some(seed) = read_env::<u64>("SIM_SEED") {
            config.seed = seed;
        }

        if let Ok(dir) = env::var("SIM_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: Self::DEFAULT_FRAMES,
            delta_time: Self::DEFAULT_DELTA_TIME,
            seed: Self::DEFAULT_SEED,
            data_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../combat/content/data")),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
