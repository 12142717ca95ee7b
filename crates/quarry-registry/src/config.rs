use serde::Deserialize;

use super::entry::{Identity, IdentityEntry, IdentityId, LegacyNumeric};
use super::error::RegistryError;
use super::name::ResourceName;
use super::registry::IdentityRegistry;
use super::version::VersionTag;

// Top-level identity table file
#[derive(Deserialize, Debug, Default)]
pub struct RegistryConfig {
    #[serde(default)]
    pub blocks: Vec<IdentityDef>,
    #[serde(default)]
    pub items: Vec<IdentityDef>,
    #[serde(default)]
    pub biomes: Vec<IdentityDef>,
}

/// One identity definition record.
///
/// `fallback` must name a record registered earlier in the same table.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityDef {
    pub id: String,
    // "id", "id:meta", or "-" for none
    #[serde(default)]
    pub numeric: Option<String>,
    #[serde(default)]
    pub pre_flattening: Option<String>,
    #[serde(default)]
    pub pre_1_18: Option<String>,
    pub introduced: String,
    #[serde(default)]
    pub fallback: Option<String>,

    // Kind-specific extras; ignored by kinds that do not use them
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub emission: Option<u8>,
    #[serde(default)]
    pub max_stack: Option<u8>,
}

impl IdentityDef {
    /// Parses one delimited row:
    /// `id,numeric,pre_flattening,pre_1_18,introduced[,fallback]`.
    pub fn from_row(line: &str) -> Result<Self, RegistryError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if !(5..=6).contains(&fields.len()) {
            return Err(RegistryError::MalformedRow(format!(
                "expected 5 or 6 fields, found {} in {line:?}",
                fields.len()
            )));
        }
        if fields[0].is_empty() || fields[4].is_empty() {
            return Err(RegistryError::MalformedRow(format!(
                "id and introduced version are required in {line:?}"
            )));
        }
        Ok(IdentityDef {
            id: fields[0].to_string(),
            numeric: optional(fields[1]),
            pre_flattening: optional(fields[2]),
            pre_1_18: optional(fields[3]),
            introduced: fields[4].to_string(),
            fallback: fields.get(5).copied().and_then(optional),
            ..IdentityDef::default()
        })
    }
}

fn optional(field: &str) -> Option<String> {
    match field {
        "" | "-" => None,
        s => Some(s.to_string()),
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty() && *s != "-")
}

impl<T: Identity> IdentityRegistry<T> {
    /// Builds an entry from `def` and registers it.
    pub fn register_def(&mut self, def: &IdentityDef) -> Result<IdentityId, RegistryError> {
        let name = ResourceName::new(&def.id)?;
        let introduced: VersionTag = def.introduced.parse()?;
        let mut entry = IdentityEntry::new(name, introduced);
        if let Some(raw) = def.numeric.as_deref() {
            if let Some(numeric) = LegacyNumeric::parse(raw)? {
                entry = entry.with_numeric(numeric);
            }
        }
        if let Some(raw) = present(&def.pre_flattening) {
            entry = entry.with_legacy_name(ResourceName::new(raw)?, VersionTag::FLATTENING);
        }
        if let Some(raw) = present(&def.pre_1_18) {
            entry = entry.with_legacy_name(ResourceName::new(raw)?, VersionTag::CAVES_AND_CLIFFS);
        }
        if let Some(fallback) = present(&def.fallback) {
            let Some(substitute) = self.find_by_name(fallback) else {
                return Err(RegistryError::UnknownFallback {
                    kind: T::KIND,
                    name: def.id.clone(),
                    fallback: fallback.to_string(),
                });
            };
            entry = entry.with_substitute(substitute);
        }
        self.register(T::from_def(entry, def)?)
    }

    /// Registers every row of a delimited table. Blank lines and `#` comments are skipped.
    pub fn register_rows(&mut self, text: &str) -> Result<Vec<IdentityId>, RegistryError> {
        let mut ids = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            ids.push(self.register_def(&IdentityDef::from_row(line)?)?);
        }
        Ok(ids)
    }
}
