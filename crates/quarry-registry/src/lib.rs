//! Versioned identity registries for blocks, items and biomes.
#![forbid(unsafe_code)]

pub mod config;
pub mod entry;
pub mod error;
pub mod kinds;
pub mod name;
pub mod registry;
pub mod shared;
pub mod version;

pub use config::{IdentityDef, RegistryConfig};
pub use entry::{
    Identity, IdentityEntry, IdentityId, LegacyName, LegacyNumeric, StorageForm, StoredIdentity,
};
pub use error::RegistryError;
pub use kinds::{BiomeIdentity, BlockIdentity, ItemIdentity};
pub use name::{DEFAULT_NAMESPACE, ResourceName};
pub use registry::{IdentityRegistry, MAX_SUBSTITUTE_HOPS, Registries};
pub use shared::SharedRegistry;
pub use version::{Stage, VersionTag};
