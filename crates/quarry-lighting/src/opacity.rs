use hashbrown::HashSet;
use serde::Deserialize;

use quarry_registry::{BlockIdentity, Identity, IdentityId, IdentityRegistry};

use crate::value::MAX_LIGHT;

/// Per-block light behaviour consulted by the engine.
pub trait OpacityClassifier {
    /// Light absorbed on entering the voxel; `15` blocks it entirely.
    fn opacity(&self, block: Option<IdentityId>) -> u8;

    /// Block light emitted by the voxel.
    fn emission(&self, _block: Option<IdentityId>) -> u8 {
        0
    }

    /// Whether the voxel stops the sky column when building the heightmap.
    fn is_heightmap_solid(&self, block: Option<IdentityId>) -> bool;
}

// [lighting] section of the engine config
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OpacityConfig {
    #[serde(default = "default_transparent")]
    pub transparent_materials: Vec<String>,
    #[serde(default = "default_liquid")]
    pub liquid_materials: Vec<String>,
    #[serde(default = "default_foliage")]
    pub foliage_materials: Vec<String>,
}

impl Default for OpacityConfig {
    fn default() -> Self {
        Self {
            transparent_materials: default_transparent(),
            liquid_materials: default_liquid(),
            foliage_materials: default_foliage(),
        }
    }
}

fn default_transparent() -> Vec<String> {
    vec!["glass".into(), "portal".into()]
}
fn default_liquid() -> Vec<String> {
    vec!["water".into()]
}
fn default_foliage() -> Vec<String> {
    vec!["leaves".into(), "plant".into()]
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightClass {
    Air,
    Transparent,
    Liquid,
    /// Leaves and plants: diffuse light like a liquid, skipped by the heightmap.
    Foliage,
    Opaque,
}

impl LightClass {
    #[inline]
    pub fn opacity(self) -> u8 {
        match self {
            LightClass::Air | LightClass::Transparent => 0,
            LightClass::Liquid | LightClass::Foliage => 1,
            LightClass::Opaque => MAX_LIGHT,
        }
    }
}

/// Light classes of every registered block, precomputed from materials.
#[derive(Clone, Debug)]
pub struct OpacityTable {
    classes: Vec<LightClass>,
    emission: Vec<u8>,
}

impl OpacityTable {
    pub fn new(registry: &IdentityRegistry<BlockIdentity>, cfg: &OpacityConfig) -> Self {
        let set = |names: &[String]| -> HashSet<String> {
            names.iter().map(|n| n.trim().to_ascii_lowercase()).collect()
        };
        let transparent = set(&cfg.transparent_materials);
        let liquid = set(&cfg.liquid_materials);
        let foliage = set(&cfg.foliage_materials);

        let mut classes = Vec::with_capacity(registry.len());
        let mut emission = Vec::with_capacity(registry.len());
        for (_, block) in registry.iter() {
            let class = if block.entry().name().as_str() == BlockIdentity::DEFAULT_NAME {
                LightClass::Air
            } else {
                match block.material() {
                    Some("air") => LightClass::Air,
                    Some(m) if foliage.contains(m) => LightClass::Foliage,
                    Some(m) if liquid.contains(m) => LightClass::Liquid,
                    Some(m) if transparent.contains(m) => LightClass::Transparent,
                    _ => LightClass::Opaque,
                }
            };
            classes.push(class);
            emission.push(block.emission());
        }
        log::debug!(
            "opacity table: {} blocks, {} emissive",
            classes.len(),
            emission.iter().filter(|&&e| e > 0).count()
        );
        Self { classes, emission }
    }

    /// Class of `block`; empty space is air and unknown ids are opaque.
    pub fn class_of(&self, block: Option<IdentityId>) -> LightClass {
        match block {
            None => LightClass::Air,
            Some(id) => self
                .classes
                .get(id.index())
                .copied()
                .unwrap_or(LightClass::Opaque),
        }
    }
}

impl OpacityClassifier for OpacityTable {
    fn opacity(&self, block: Option<IdentityId>) -> u8 {
        self.class_of(block).opacity()
    }

    fn emission(&self, block: Option<IdentityId>) -> u8 {
        block
            .and_then(|id| self.emission.get(id.index()).copied())
            .unwrap_or(0)
    }

    fn is_heightmap_solid(&self, block: Option<IdentityId>) -> bool {
        !matches!(self.class_of(block), LightClass::Air | LightClass::Foliage)
    }
}
