//! Entity roster loader.
//!
//! A roster is a RON list of [`EntityData`] creation requests. Every entry is
//! validated on load so a bad roster fails before anything is spawned.

use std::path::Path;

use combat_core::EntityData;

use crate::loaders::{LoadResult, read_file};

/// Loader for entity rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load and validate a roster from a RON file.
    ///
    /// RON format: `Vec<EntityData>`
    pub fn load(path: &Path) -> LoadResult<Vec<EntityData>> {
        let content = read_file(path)?;
        let roster = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))?;

        tracing::debug!(
            "Loaded {} roster entries from {}",
            roster.len(),
            path.display()
        );
        Ok(roster)
    }

    /// Parse and validate a roster from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<EntityData>> {
        let roster: Vec<EntityData> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        for (index, entry) in roster.iter().enumerate() {
            entry.validate().map_err(|e| {
                anyhow::anyhow!(
                    "Invalid roster entry #{} ('{}'): {}",
                    index,
                    entry.name,
                    e
                )
            })?;
        }

        Ok(roster)
    }
}
