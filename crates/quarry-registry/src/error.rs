use crate::entry::{IdentityId, LegacyNumeric};

#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("{kind} `{name}` is already registered")]
    DuplicateIdentity { kind: &'static str, name: String },
    #[error("{kind} `{name}` claims numeric form {numeric} already held by `{holder}`")]
    NumericFormTaken {
        kind: &'static str,
        name: String,
        numeric: LegacyNumeric,
        holder: String,
    },
    #[error("{kind} `{name}` names substitute {substitute:?} which is not registered")]
    UnknownSubstitute {
        kind: &'static str,
        name: String,
        substitute: IdentityId,
    },
    #[error("{kind} `{name}` falls back to `{fallback}` which has not been registered yet")]
    UnknownFallback {
        kind: &'static str,
        name: String,
        fallback: String,
    },
    #[error("substitute chain for {kind} `{name}` exceeds {hops} hops")]
    ResolutionCycle {
        kind: &'static str,
        name: String,
        hops: usize,
    },
    #[error("default {kind} `{name}` is not registered")]
    MissingDefault { kind: &'static str, name: String },
    #[error("invalid version string: {0:?}")]
    InvalidVersion(String),
    #[error("invalid legacy numeric form: {0:?}")]
    InvalidNumericForm(String),
    #[error("invalid resource name: {0:?}")]
    InvalidName(String),
    #[error("malformed identity row: {0}")]
    MalformedRow(String),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
