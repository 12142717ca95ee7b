use thiserror::Error;

use quarry_chunk::ChunkError;
use quarry_registry::RegistryError;

#[derive(Debug, Error)]
pub enum QuarryError {
    #[error("config: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Chunk(#[from] ChunkError),
    #[error("no target version given and none configured")]
    NoTargetVersion,
}
