use std::path::Path;

use quarry_chunk::ChunkColumn;
use quarry_lighting::{BakeReport, BakeStats, OpacityTable, bake_columns};
use quarry_registry::{Registries, StoredIdentity, VersionTag};

use crate::config::QuarryConfig;
use crate::error::QuarryError;

/// Registries plus the light classification derived from them.
///
/// Built once at start-up and shared by reference with whatever edits and
/// saves chunk columns.
#[derive(Debug)]
pub struct Quarry {
    registries: Registries,
    opacity: OpacityTable,
    target_version: Option<VersionTag>,
}

impl Quarry {
    pub fn new(registries: Registries, cfg: &QuarryConfig) -> Self {
        let opacity = OpacityTable::new(&registries.blocks, &cfg.lighting);
        Self {
            registries,
            opacity,
            target_version: cfg.target_version,
        }
    }

    pub fn from_config(cfg: &QuarryConfig) -> Result<Self, QuarryError> {
        let registries = match &cfg.identities {
            Some(path) => Registries::load_from_path(path)?,
            None => {
                log::warn!("no identity table configured; starting with empty registries");
                Registries::new()
            }
        };
        Ok(Self::new(registries, cfg))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuarryError> {
        Self::from_config(&QuarryConfig::load_from_path(path)?)
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn opacity(&self) -> &OpacityTable {
        &self.opacity
    }

    /// Relights one column after an edit.
    pub fn bake_column(&self, column: &mut ChunkColumn) -> Result<BakeStats, QuarryError> {
        Ok(column.bake_lighting(&self.opacity)?)
    }

    /// Relights a batch of columns in parallel; failures are per column.
    pub fn bake_lighting(&self, columns: &mut [ChunkColumn]) -> BakeReport {
        bake_columns(columns, &self.opacity)
    }

    /// One section's blocks in the vocabulary of `version`, or of the
    /// configured target version when `version` is `None`.
    pub fn stored_blocks(
        &self,
        column: &ChunkColumn,
        section_y: i32,
        version: Option<VersionTag>,
    ) -> Result<Vec<StoredIdentity>, QuarryError> {
        let version = version
            .or(self.target_version)
            .ok_or(QuarryError::NoTargetVersion)?;
        Ok(column.stored_blocks(section_y, &self.registries.blocks, version)?)
    }
}
