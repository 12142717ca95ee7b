use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Release channel of a game version. Alpha sorts before beta, beta before release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    Alpha,
    Beta,
    #[default]
    Release,
}

/// A game release, totally ordered by stage then major/minor/patch.
///
/// Parsed from strings such as `1.13`, `1.18.2`, `b1.7.3` or `a1.2.6`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTag {
    stage: Stage,
    major: u16,
    minor: u16,
    patch: u16,
}

impl VersionTag {
    /// Numeric (id, meta) storage gives way to namespaced string ids.
    pub const FLATTENING: VersionTag = VersionTag::release(1, 13, 0);
    /// Biome ids are renamed and stored as strings in chunk data.
    pub const CAVES_AND_CLIFFS: VersionTag = VersionTag::release(1, 18, 0);
    /// Item stacks switch from numeric ids to string ids.
    pub const NAMED_ITEMS: VersionTag = VersionTag::release(1, 8, 0);
    /// Earliest version any entry can claim.
    pub const EARLIEST: VersionTag = VersionTag {
        stage: Stage::Alpha,
        major: 0,
        minor: 0,
        patch: 0,
    };

    #[inline]
    pub const fn release(major: u16, minor: u16, patch: u16) -> Self {
        Self {
            stage: Stage::Release,
            major,
            minor,
            patch,
        }
    }

    #[inline]
    pub const fn new(stage: Stage, major: u16, minor: u16, patch: u16) -> Self {
        Self {
            stage,
            major,
            minor,
            patch,
        }
    }

    #[inline]
    pub fn stage(self) -> Stage {
        self.stage
    }

    #[inline]
    pub fn parts(self) -> (u16, u16, u16) {
        (self.major, self.minor, self.patch)
    }
}

impl FromStr for VersionTag {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RegistryError::InvalidVersion(s.to_string());
        let trimmed = s.trim();
        let (stage, rest) = match trimmed.as_bytes().first() {
            Some(b'a') => (Stage::Alpha, &trimmed[1..]),
            Some(b'b') => (Stage::Beta, &trimmed[1..]),
            Some(_) => (Stage::Release, trimmed),
            None => return Err(invalid()),
        };
        let mut parts = [0u16; 3];
        let mut count = 0;
        for piece in rest.split('.') {
            if count == parts.len() {
                return Err(invalid());
            }
            parts[count] = piece.parse::<u16>().map_err(|_| invalid())?;
            count += 1;
        }
        Ok(VersionTag::new(stage, parts[0], parts[1], parts[2]))
    }
}

impl TryFrom<String> for VersionTag {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionTag> for String {
    fn from(value: VersionTag) -> Self {
        value.to_string()
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stage {
            Stage::Alpha => f.write_str("a")?,
            Stage::Beta => f.write_str("b")?,
            Stage::Release => {}
        }
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        }
    }
}
