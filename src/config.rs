use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use quarry_lighting::OpacityConfig;
use quarry_registry::VersionTag;

use crate::error::QuarryError;

/// Top-level `quarry.toml`.
///
/// ```toml
/// identities = "identities.toml"
/// target_version = "1.12.2"
///
/// [lighting]
/// transparent_materials = ["glass", "portal"]
/// ```
#[derive(Deserialize, Debug, Clone, Default)]
pub struct QuarryConfig {
    // Identity table, relative to the config file
    #[serde(default)]
    pub identities: Option<PathBuf>,
    // Version written when none is given explicitly
    #[serde(default)]
    pub target_version: Option<VersionTag>,
    #[serde(default)]
    pub lighting: OpacityConfig,
}

impl QuarryConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, QuarryError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Reads the config and makes `identities` absolute against its directory.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, QuarryError> {
        let path = path.as_ref();
        let mut cfg = Self::from_toml_str(&fs::read_to_string(path)?)?;
        if let (Some(rel), Some(dir)) = (cfg.identities.as_ref(), path.parent()) {
            if rel.is_relative() {
                cfg.identities = Some(dir.join(rel));
            }
        }
        Ok(cfg)
    }
}
