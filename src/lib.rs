//! World-save identities and lighting across game versions.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod world;

pub use config::QuarryConfig;
pub use error::QuarryError;
pub use world::Quarry;

pub use quarry_chunk::{ChunkColumn, ChunkError, Section};
pub use quarry_lighting::{
    BakeReport, BakeStats, ColumnPos, LightError, LightPropagationEngine, LightValue,
    OpacityClassifier, OpacityConfig, OpacityTable, PackedLight, VoxelAccess, VoxelError,
};
pub use quarry_registry::{
    BiomeIdentity, BlockIdentity, Identity, IdentityDef, IdentityEntry, IdentityId,
    IdentityRegistry, ItemIdentity, LegacyNumeric, Registries, RegistryError, ResourceName,
    SharedRegistry, StoredIdentity, VersionTag,
};

#[cfg(test)]
mod tests;
