use std::fs;
use std::path::Path;

use hashbrown::HashMap;

use super::config::RegistryConfig;
use super::entry::{
    Identity, IdentityEntry, IdentityId, LegacyNumeric, StorageForm, StoredIdentity,
};
use super::error::RegistryError;
use super::kinds::{BiomeIdentity, BlockIdentity, ItemIdentity};
use super::name::{ResourceName, normalize_key};
use super::version::VersionTag;

/// Upper bound on substitute links followed by a single resolution.
pub const MAX_SUBSTITUTE_HOPS: usize = 100;

/// Append-only table of identities of one kind.
///
/// Entries live in an arena and are addressed by [`IdentityId`]. The name,
/// alias and numeric indexes only ever point into that arena.
#[derive(Clone, Debug)]
pub struct IdentityRegistry<T: Identity> {
    entries: Vec<T>,
    by_name: HashMap<String, IdentityId>,
    by_alias: HashMap<String, IdentityId>,
    by_numeric: HashMap<LegacyNumeric, IdentityId>,
}

impl<T: Identity> Default for IdentityRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identity> IdentityRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_name: HashMap::new(),
            by_alias: HashMap::new(),
            by_numeric: HashMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, id: IdentityId) -> Option<&T> {
        self.entries.get(id.index())
    }

    pub fn name_of(&self, id: IdentityId) -> Option<&ResourceName> {
        self.get(id).map(|t| t.entry().name())
    }

    pub fn iter(&self) -> impl Iterator<Item = (IdentityId, &T)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, t)| (IdentityId(i as u32), t))
    }

    /// Appends `identity`. On error the registry is left untouched.
    pub fn register(&mut self, identity: T) -> Result<IdentityId, RegistryError> {
        let entry = identity.entry();
        let name = entry.name().as_str().to_string();
        if self.by_name.contains_key(&name) {
            return Err(RegistryError::DuplicateIdentity { kind: T::KIND, name });
        }
        let numeric = entry.numeric();
        if let Some(n) = numeric {
            if let Some(&holder) = self.by_numeric.get(&n) {
                return Err(RegistryError::NumericFormTaken {
                    kind: T::KIND,
                    name,
                    numeric: n,
                    holder: self.display_name(holder),
                });
            }
        }
        if let Some(substitute) = entry.substitute() {
            if substitute.index() >= self.entries.len() {
                return Err(RegistryError::UnknownSubstitute {
                    kind: T::KIND,
                    name,
                    substitute,
                });
            }
        }
        let aliases: Vec<String> = entry
            .legacy_names()
            .iter()
            .map(|l| l.name.as_str().to_string())
            .filter(|alias| *alias != name)
            .collect();

        let id = IdentityId(self.entries.len() as u32);
        for alias in aliases {
            if let Some(&holder) = self.by_alias.get(&alias) {
                log::debug!(
                    "{} alias `{}` of `{}` already bound to `{}`; keeping the first",
                    T::KIND,
                    alias,
                    name,
                    self.display_name(holder)
                );
                continue;
            }
            self.by_alias.insert(alias, id);
        }
        if let Some(n) = numeric {
            self.by_numeric.insert(n, id);
        }
        self.by_name.insert(name, id);
        self.entries.push(identity);
        Ok(id)
    }

    /// Canonical name first, then legacy aliases.
    pub fn find_by_name(&self, name: &str) -> Option<IdentityId> {
        let key = normalize_key(name);
        self.by_name
            .get(&key)
            .or_else(|| self.by_alias.get(&key))
            .copied()
    }

    /// Exact `(id, meta)` first, then the generic `(id, 0)` variant.
    pub fn find_by_numeric(&self, numeric: LegacyNumeric) -> Option<IdentityId> {
        self.by_numeric
            .get(&numeric)
            .or_else(|| self.by_numeric.get(&numeric.base()))
            .copied()
    }

    /// Walks the substitute chain until an entry that exists in `version` is found.
    ///
    /// `Ok(None)` means no equivalent exists and the caller should use the
    /// kind's default element.
    pub fn resolve_for_version(
        &self,
        id: IdentityId,
        version: VersionTag,
    ) -> Result<Option<IdentityId>, RegistryError> {
        let mut current = id;
        for _ in 0..=MAX_SUBSTITUTE_HOPS {
            let Some(identity) = self.get(current) else {
                return Ok(None);
            };
            let entry = identity.entry();
            if entry.exists_in(version) {
                return Ok(Some(current));
            }
            match entry.substitute() {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Err(RegistryError::ResolutionCycle {
            kind: T::KIND,
            name: self.display_name(id),
            hops: MAX_SUBSTITUTE_HOPS,
        })
    }

    pub fn default_id(&self) -> Result<IdentityId, RegistryError> {
        self.find_by_name(T::DEFAULT_NAME)
            .ok_or_else(|| RegistryError::MissingDefault {
                kind: T::KIND,
                name: T::DEFAULT_NAME.to_string(),
            })
    }

    pub fn resolve_or_default(
        &self,
        id: IdentityId,
        version: VersionTag,
    ) -> Result<IdentityId, RegistryError> {
        match self.resolve_for_version(id, version)? {
            Some(resolved) => Ok(resolved),
            None => self.default_id(),
        }
    }

    /// Resolves `id` for `version` and renders it in that version's vocabulary.
    pub fn encode_for_version(
        &self,
        id: IdentityId,
        version: VersionTag,
    ) -> Result<Option<StoredIdentity>, RegistryError> {
        let Some(resolved) = self.resolve_for_version(id, version)? else {
            return Ok(None);
        };
        let entry = self.entries[resolved.index()].entry();
        let stored = match T::storage_form(version) {
            StorageForm::Numeric => match entry.numeric() {
                Some(n) => StoredIdentity::Numeric(n),
                None => {
                    log::debug!(
                        "{} `{}` has no numeric form for {}; writing its name",
                        T::KIND,
                        entry.name(),
                        version
                    );
                    Self::name_at(entry, version)
                }
            },
            StorageForm::Name => Self::name_at(entry, version),
        };
        Ok(Some(stored))
    }

    /// Like [`encode_for_version`](Self::encode_for_version) but substitutes the
    /// kind's default element when nothing resolves.
    pub fn encode_or_default(
        &self,
        id: IdentityId,
        version: VersionTag,
    ) -> Result<StoredIdentity, RegistryError> {
        if let Some(stored) = self.encode_for_version(id, version)? {
            return Ok(stored);
        }
        let fallback = self.default_id()?;
        self.encode_for_version(fallback, version)?
            .ok_or_else(|| RegistryError::MissingDefault {
                kind: T::KIND,
                name: T::DEFAULT_NAME.to_string(),
            })
    }

    pub fn decode(&self, stored: &StoredIdentity) -> Option<IdentityId> {
        match stored {
            StoredIdentity::Numeric(n) => self.find_by_numeric(*n),
            StoredIdentity::Name(name) => self.find_by_name(name),
        }
    }

    fn name_at(entry: &IdentityEntry, version: VersionTag) -> StoredIdentity {
        let name = entry.legacy_name_at(version).unwrap_or(entry.name());
        StoredIdentity::Name(name.to_string())
    }

    fn display_name(&self, id: IdentityId) -> String {
        self.name_of(id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("#{}", id.0))
    }
}

/// The per-kind registries of one process, passed explicitly to whoever needs them.
#[derive(Clone, Debug, Default)]
pub struct Registries {
    pub blocks: IdentityRegistry<BlockIdentity>,
    pub items: IdentityRegistry<ItemIdentity>,
    pub biomes: IdentityRegistry<BiomeIdentity>,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &RegistryConfig) -> Result<Self, RegistryError> {
        let mut reg = Registries::new();
        for def in &cfg.blocks {
            reg.blocks.register_def(def)?;
        }
        for def in &cfg.items {
            reg.items.register_def(def)?;
        }
        for def in &cfg.biomes {
            reg.biomes.register_def(def)?;
        }
        log::info!(
            "loaded registries: {} blocks, {} items, {} biomes",
            reg.blocks.len(),
            reg.items.len(),
            reg.biomes.len()
        );
        Ok(reg)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, RegistryError> {
        let cfg: RegistryConfig = toml::from_str(toml_str)?;
        Self::from_config(&cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
