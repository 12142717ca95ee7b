use std::fmt;

use crate::config::IdentityDef;
use crate::error::RegistryError;
use crate::name::ResourceName;
use crate::version::VersionTag;

/// Handle into the arena of one [`IdentityRegistry`](crate::IdentityRegistry).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IdentityId(pub u32);

impl IdentityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Pre-flattening numeric form: block/item id plus sub-id ("meta").
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LegacyNumeric {
    pub id: u16,
    pub meta: u8,
}

impl LegacyNumeric {
    #[inline]
    pub const fn new(id: u16, meta: u8) -> Self {
        Self { id, meta }
    }

    /// The generic variant of this form (`meta == 0`).
    #[inline]
    pub const fn base(self) -> Self {
        Self { id: self.id, meta: 0 }
    }

    /// Parses `id`, `id:meta`, or `-`/empty for "no numeric form".
    pub fn parse(raw: &str) -> Result<Option<Self>, RegistryError> {
        let s = raw.trim();
        if s.is_empty() || s == "-" {
            return Ok(None);
        }
        let invalid = || RegistryError::InvalidNumericForm(raw.to_string());
        let (id, meta) = match s.split_once(':') {
            Some((id, meta)) => (id, meta.trim()),
            None => (s, "0"),
        };
        let id = id.trim().parse::<u16>().map_err(|_| invalid())?;
        let meta = meta.parse::<u8>().map_err(|_| invalid())?;
        Ok(Some(Self { id, meta }))
    }
}

impl fmt::Display for LegacyNumeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.id, self.meta)
    }
}

/// String alias valid for every version strictly before `before`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyName {
    pub name: ResourceName,
    pub before: VersionTag,
}

/// One versioned identity, shared by every kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentityEntry {
    name: ResourceName,
    numeric: Option<LegacyNumeric>,
    legacy_names: Vec<LegacyName>,
    introduced: VersionTag,
    substitute: Option<IdentityId>,
}

impl IdentityEntry {
    pub fn new(name: ResourceName, introduced: VersionTag) -> Self {
        Self {
            name,
            numeric: None,
            legacy_names: Vec::new(),
            introduced,
            substitute: None,
        }
    }

    pub fn with_numeric(mut self, numeric: LegacyNumeric) -> Self {
        self.numeric = Some(numeric);
        self
    }

    pub fn with_legacy_name(mut self, name: ResourceName, before: VersionTag) -> Self {
        self.legacy_names.push(LegacyName { name, before });
        self
    }

    pub fn with_substitute(mut self, substitute: IdentityId) -> Self {
        self.substitute = Some(substitute);
        self
    }

    #[inline]
    pub fn name(&self) -> &ResourceName {
        &self.name
    }

    #[inline]
    pub fn numeric(&self) -> Option<LegacyNumeric> {
        self.numeric
    }

    #[inline]
    pub fn legacy_names(&self) -> &[LegacyName] {
        &self.legacy_names
    }

    #[inline]
    pub fn introduced(&self) -> VersionTag {
        self.introduced
    }

    #[inline]
    pub fn substitute(&self) -> Option<IdentityId> {
        self.substitute
    }

    #[inline]
    pub fn exists_in(&self, version: VersionTag) -> bool {
        version >= self.introduced
    }

    /// Alias in effect at `version`; the tightest threshold wins when several apply.
    pub fn legacy_name_at(&self, version: VersionTag) -> Option<&ResourceName> {
        self.legacy_names
            .iter()
            .filter(|l| version < l.before)
            .min_by_key(|l| l.before)
            .map(|l| &l.name)
    }
}

/// Vocabulary a kind uses on disk for a given version.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StorageForm {
    /// Pre-flattening `(id, meta)` pairs.
    Numeric,
    /// String ids: the alias in effect at the version, else the canonical name.
    Name,
}

/// An identity as written to (or read from) world data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StoredIdentity {
    Numeric(LegacyNumeric),
    Name(String),
}

impl fmt::Display for StoredIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredIdentity::Numeric(n) => write!(f, "{n}"),
            StoredIdentity::Name(s) => f.write_str(s),
        }
    }
}

/// Shape shared by block, item and biome identities.
pub trait Identity: Send + Sync + Sized + 'static {
    /// Human-readable kind, used in errors and logs.
    const KIND: &'static str;
    /// Element callers fall back to when nothing resolves.
    const DEFAULT_NAME: &'static str;

    fn entry(&self) -> &IdentityEntry;

    /// Which vocabulary world data of `version` uses for this kind.
    fn storage_form(version: VersionTag) -> StorageForm;

    /// Builds the kind payload from an ingested definition row.
    fn from_def(entry: IdentityEntry, def: &IdentityDef) -> Result<Self, RegistryError>;
}
