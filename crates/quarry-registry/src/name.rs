use std::fmt;
use std::str::FromStr;

use crate::error::RegistryError;

/// Namespace used for names given without an explicit prefix.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Namespaced identifier in normalized `namespace:path` form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceName {
    full: String,
    split: usize,
}

impl ResourceName {
    pub fn new(raw: &str) -> Result<Self, RegistryError> {
        let lowered = raw.trim().to_ascii_lowercase();
        let (namespace, path) = match lowered.split_once(':') {
            Some((ns, p)) => (ns, p),
            None => (DEFAULT_NAMESPACE, lowered.as_str()),
        };
        let ns_ok = !namespace.is_empty() && namespace.chars().all(|c| valid_char(c, false));
        let path_ok = !path.is_empty() && path.chars().all(|c| valid_char(c, true));
        if !ns_ok || !path_ok {
            return Err(RegistryError::InvalidName(raw.to_string()));
        }
        Ok(Self {
            split: namespace.len(),
            full: format!("{namespace}:{path}"),
        })
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.full[..self.split]
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.full[self.split + 1..]
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.full
    }

    #[inline]
    pub fn is_builtin(&self) -> bool {
        self.namespace() == DEFAULT_NAMESPACE
    }
}

#[inline]
fn valid_char(c: char, in_path: bool) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '-' | '.') || (in_path && c == '/')
}

/// Normalizes a lookup key the same way stored names are normalized.
/// Keys that are not valid names are returned lower-cased as-is so they simply miss.
pub(crate) fn normalize_key(raw: &str) -> String {
    match ResourceName::new(raw) {
        Ok(name) => name.full,
        Err(_) => raw.trim().to_ascii_lowercase(),
    }
}

impl FromStr for ResourceName {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceName::new(s)
    }
}

impl fmt::Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl AsRef<str> for ResourceName {
    fn as_ref(&self) -> &str {
        &self.full
    }
}
