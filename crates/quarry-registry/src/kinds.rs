//! The three identity kinds carried by world data.

use crate::config::IdentityDef;
use crate::entry::{Identity, IdentityEntry, StorageForm};
use crate::error::RegistryError;
use crate::version::VersionTag;

/// Maximum light a block can emit.
pub const MAX_EMISSION: u8 = 15;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockIdentity {
    entry: IdentityEntry,
    material: Option<String>,
    emission: u8,
}

impl BlockIdentity {
    pub fn new(entry: IdentityEntry) -> Self {
        Self {
            entry,
            material: None,
            emission: 0,
        }
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_emission(mut self, emission: u8) -> Self {
        self.emission = emission.min(MAX_EMISSION);
        self
    }

    /// Material tag used for opacity classification (e.g. `glass`, `water`).
    #[inline]
    pub fn material(&self) -> Option<&str> {
        self.material.as_deref()
    }

    #[inline]
    pub fn emission(&self) -> u8 {
        self.emission
    }
}

impl Identity for BlockIdentity {
    const KIND: &'static str = "block";
    const DEFAULT_NAME: &'static str = "minecraft:air";

    fn entry(&self) -> &IdentityEntry {
        &self.entry
    }

    fn storage_form(version: VersionTag) -> StorageForm {
        if version < VersionTag::FLATTENING {
            StorageForm::Numeric
        } else {
            StorageForm::Name
        }
    }

    fn from_def(entry: IdentityEntry, def: &IdentityDef) -> Result<Self, RegistryError> {
        let mut block = BlockIdentity::new(entry).with_emission(def.emission.unwrap_or(0));
        if let Some(material) = &def.material {
            block = block.with_material(material.to_ascii_lowercase());
        }
        Ok(block)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemIdentity {
    entry: IdentityEntry,
    max_stack: u8,
}

impl ItemIdentity {
    pub const DEFAULT_MAX_STACK: u8 = 64;

    pub fn new(entry: IdentityEntry) -> Self {
        Self {
            entry,
            max_stack: Self::DEFAULT_MAX_STACK,
        }
    }

    pub fn with_max_stack(mut self, max_stack: u8) -> Self {
        self.max_stack = max_stack.clamp(1, Self::DEFAULT_MAX_STACK);
        self
    }

    #[inline]
    pub fn max_stack(&self) -> u8 {
        self.max_stack
    }
}

impl Identity for ItemIdentity {
    const KIND: &'static str = "item";
    const DEFAULT_NAME: &'static str = "minecraft:air";

    fn entry(&self) -> &IdentityEntry {
        &self.entry
    }

    fn storage_form(version: VersionTag) -> StorageForm {
        if version < VersionTag::NAMED_ITEMS {
            StorageForm::Numeric
        } else {
            StorageForm::Name
        }
    }

    fn from_def(entry: IdentityEntry, def: &IdentityDef) -> Result<Self, RegistryError> {
        let item = ItemIdentity::new(entry);
        Ok(match def.max_stack {
            Some(n) => item.with_max_stack(n),
            None => item,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeIdentity {
    entry: IdentityEntry,
}

impl BiomeIdentity {
    pub fn new(entry: IdentityEntry) -> Self {
        Self { entry }
    }
}

impl Identity for BiomeIdentity {
    const KIND: &'static str = "biome";
    const DEFAULT_NAME: &'static str = "minecraft:plains";

    fn entry(&self) -> &IdentityEntry {
        &self.entry
    }

    fn storage_form(version: VersionTag) -> StorageForm {
        if version < VersionTag::CAVES_AND_CLIFFS {
            StorageForm::Numeric
        } else {
            StorageForm::Name
        }
    }

    fn from_def(entry: IdentityEntry, _def: &IdentityDef) -> Result<Self, RegistryError> {
        Ok(BiomeIdentity::new(entry))
    }
}
