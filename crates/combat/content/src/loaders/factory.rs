//! Content factory for loading every combat data file from one directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, EntityData};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader};

/// Loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "combat.toml";
    pub const ROSTER_FILE: &'static str = "roster.ron";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load combat configuration from `combat.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        ConfigLoader::load(&self.data_dir.join(Self::CONFIG_FILE))
    }

    /// Like [`load_config`](Self::load_config), but a missing file yields the
    /// defaults.
    pub fn load_config_or_default(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            tracing::debug!("{} not found, using default config", path.display());
            Ok(CombatConfig::default())
        }
    }

    /// Load the entity roster from `roster.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<EntityData>> {
        RosterLoader::load(&self.data_dir.join(Self::ROSTER_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_both_files_from_directory() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join(ContentFactory::CONFIG_FILE),
            "[player]\nattack_duration = 0.25\n",
        )
        .expect("write config");
        std::fs::write(
            dir.path().join(ContentFactory::ROSTER_FILE),
            r#"[(name: "Hero", entity_type: Player)]"#,
        )
        .expect("write roster");

        let factory = ContentFactory::new(dir.path());

        let config = factory.load_config().expect("config loads");
        assert_eq!(config.player.attack_duration, 0.25);
        let roster = factory.load_roster().expect("roster loads");
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let factory = ContentFactory::new(dir.path());

        assert!(factory.load_config().is_err());
        assert_eq!(
            factory.load_config_or_default().expect("defaults"),
            CombatConfig::default()
        );
    }

    #[test]
    fn bundled_data_files_parse() {
        let factory = ContentFactory::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));

        factory.load_config().expect("bundled combat.toml");
        let roster = factory.load_roster().expect("bundled roster.ron");
        assert!(!roster.is_empty());
    }
}
