//! Sparse chunk columns: block and light storage per 16-tall section.
#![forbid(unsafe_code)]

use std::collections::BTreeMap;

use hashbrown::HashMap;
use quarry_lighting::{
    BakeStats, COLUMN_WIDTH, ColumnPos, LightError, LightPropagationEngine, LightValue,
    OpacityClassifier, PackedLight, SECTION_HEIGHT, SECTION_VOLUME, VoxelAccess, VoxelError,
    decode_section, encode, voxel_index,
};
use quarry_registry::{
    BlockIdentity, IdentityId, IdentityRegistry, RegistryError, StoredIdentity, VersionTag,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChunkError {
    #[error(transparent)]
    Light(#[from] LightError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("column {pos} has no section {section_y}")]
    MissingSection { pos: ColumnPos, section_y: i32 },
    #[error("section data must hold {expected} blocks, got {found}")]
    BlockCount { expected: usize, found: usize },
}

/// One 16x16x16 slice of a column. `None` blocks are empty space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    blocks: Vec<Option<IdentityId>>,
    light: Vec<LightValue>,
}

impl Default for Section {
    fn default() -> Self {
        Self::new()
    }
}

impl Section {
    pub fn new() -> Self {
        Self {
            blocks: vec![None; SECTION_VOLUME],
            light: vec![LightValue::DARK; SECTION_VOLUME],
        }
    }

    #[inline]
    pub fn block(&self, x: usize, y: usize, z: usize) -> Option<IdentityId> {
        self.blocks[voxel_index(x, y, z)]
    }

    #[inline]
    pub fn light(&self, x: usize, y: usize, z: usize) -> LightValue {
        self.light[voxel_index(x, y, z)]
    }

    pub fn is_all_air(&self) -> bool {
        self.blocks.iter().all(Option::is_none)
    }

    pub fn light_field(&self) -> &[LightValue] {
        &self.light
    }
}

/// A vertical stack of sections at one column position.
///
/// Only sections that were written exist; reads elsewhere see empty, dark
/// space.
#[derive(Clone, Debug)]
pub struct ChunkColumn {
    pos: ColumnPos,
    sections: BTreeMap<i32, Section>,
}

#[inline]
fn split_y(y: i32) -> (i32, usize) {
    (
        y.div_euclid(SECTION_HEIGHT),
        y.rem_euclid(SECTION_HEIGHT) as usize,
    )
}

impl ChunkColumn {
    pub fn new(pos: ColumnPos) -> Self {
        Self {
            pos,
            sections: BTreeMap::new(),
        }
    }

    pub fn section(&self, section_y: i32) -> Option<&Section> {
        self.sections.get(&section_y)
    }

    pub fn sections(&self) -> impl Iterator<Item = (i32, &Section)> {
        self.sections.iter().map(|(&y, s)| (y, s))
    }

    fn check_xz(x: usize, y: i32, z: usize) -> Result<(), VoxelError> {
        if x >= COLUMN_WIDTH || z >= COLUMN_WIDTH {
            return Err(VoxelError::OutOfBounds { x, y, z });
        }
        Ok(())
    }

    /// Places `block`, creating its section on first write.
    pub fn set_block(
        &mut self,
        x: usize,
        y: i32,
        z: usize,
        block: Option<IdentityId>,
    ) -> Result<(), VoxelError> {
        Self::check_xz(x, y, z)?;
        let (sy, ly) = split_y(y);
        if block.is_none() && !self.sections.contains_key(&sy) {
            return Ok(());
        }
        let section = self.sections.entry(sy).or_default();
        section.blocks[voxel_index(x, ly, z)] = block;
        Ok(())
    }

    /// Light of one section in the persisted two-array layout.
    pub fn section_light_packed(&self, section_y: i32) -> Result<PackedLight, ChunkError> {
        let section = self.section(section_y).ok_or(ChunkError::MissingSection {
            pos: self.pos,
            section_y,
        })?;
        Ok(encode(&section.light))
    }

    /// Replaces one section's light with previously persisted data.
    pub fn load_section_light(
        &mut self,
        section_y: i32,
        block: &[u8],
        sky: &[u8],
    ) -> Result<(), ChunkError> {
        let field = decode_section(block, sky)?;
        self.sections.entry(section_y).or_default().light = field;
        Ok(())
    }

    /// Recomputes sky and block light for the whole column.
    pub fn bake_lighting<C>(&mut self, classifier: &C) -> Result<BakeStats, ChunkError>
    where
        C: OpacityClassifier + ?Sized,
    {
        let stats = LightPropagationEngine::new().bake_column(self, classifier)?;
        log::debug!(
            "baked column {}: {} seeds, {} raises",
            self.pos,
            stats.seeded,
            stats.raised
        );
        Ok(stats)
    }

    /// Blocks of one section in the vocabulary `version` stores on disk.
    ///
    /// Blocks with no equivalent in `version` are written as air.
    pub fn stored_blocks(
        &self,
        section_y: i32,
        registry: &IdentityRegistry<BlockIdentity>,
        version: VersionTag,
    ) -> Result<Vec<StoredIdentity>, ChunkError> {
        let section = self.section(section_y).ok_or(ChunkError::MissingSection {
            pos: self.pos,
            section_y,
        })?;
        let air = registry.default_id()?;
        let mut palette: HashMap<IdentityId, StoredIdentity> = HashMap::new();
        let mut out = Vec::with_capacity(SECTION_VOLUME);
        for block in &section.blocks {
            let id = block.unwrap_or(air);
            let stored = match palette.get(&id) {
                Some(s) => s.clone(),
                None => {
                    let s = registry.encode_or_default(id, version)?;
                    palette.insert(id, s.clone());
                    s
                }
            };
            out.push(stored);
        }
        Ok(out)
    }

    /// Fills one section from stored identities. Unknown entries become empty
    /// space; their count is returned.
    pub fn load_stored_blocks(
        &mut self,
        section_y: i32,
        stored: &[StoredIdentity],
        registry: &IdentityRegistry<BlockIdentity>,
    ) -> Result<usize, ChunkError> {
        if stored.len() != SECTION_VOLUME {
            return Err(ChunkError::BlockCount {
                expected: SECTION_VOLUME,
                found: stored.len(),
            });
        }
        let air = registry.default_id().ok();
        let mut unknown = 0;
        let section = self.sections.entry(section_y).or_default();
        for (slot, s) in section.blocks.iter_mut().zip(stored) {
            let id = registry.decode(s);
            if id.is_none() {
                unknown += 1;
            }
            *slot = id.filter(|&id| Some(id) != air);
        }
        if unknown > 0 {
            log::debug!(
                "column {} section {}: {} unknown block ids loaded as air",
                self.pos,
                section_y,
                unknown
            );
        }
        Ok(unknown)
    }
}

impl VoxelAccess for ChunkColumn {
    fn position(&self) -> ColumnPos {
        self.pos
    }

    fn block(&self, x: usize, y: i32, z: usize) -> Result<Option<IdentityId>, VoxelError> {
        Self::check_xz(x, y, z)?;
        let (sy, ly) = split_y(y);
        Ok(self.sections.get(&sy).and_then(|s| s.block(x, ly, z)))
    }

    fn light(&self, x: usize, y: i32, z: usize) -> Result<LightValue, VoxelError> {
        Self::check_xz(x, y, z)?;
        let (sy, ly) = split_y(y);
        Ok(self
            .sections
            .get(&sy)
            .map_or(LightValue::DARK, |s| s.light(x, ly, z)))
    }

    fn set_light(&mut self, x: usize, y: i32, z: usize, value: LightValue) -> Result<(), VoxelError> {
        Self::check_xz(x, y, z)?;
        let (sy, ly) = split_y(y);
        if value.is_dark() && !self.sections.contains_key(&sy) {
            return Ok(());
        }
        let section = self.sections.entry(sy).or_default();
        section.light[voxel_index(x, ly, z)] = value;
        Ok(())
    }

    fn lowest_populated_section(&self) -> Option<i32> {
        self.sections.keys().next().copied()
    }

    fn highest_populated_section(&self) -> Option<i32> {
        self.sections.keys().next_back().copied()
    }
}

#[cfg(test)]
mod tests;
