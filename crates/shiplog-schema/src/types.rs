use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// GenId
///
/// Identifier of one generator in the fixed onboard universe. Entry maps key
/// generator readings under `gen{N}` namespaces; the mapping between id and
/// map key lives here so the state machine, renderer, and serializer all
/// agree on it.
///

#[derive(
    Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct GenId(u8);

impl GenId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Top-level entry key for this generator's readings (`gen1`, `gen2`, …).
    #[must_use]
    pub fn map_key(self) -> String {
        format!("gen{}", self.0)
    }

    /// Inverse of [`map_key`](Self::map_key); `None` for keys outside the
    /// `gen{N}` namespace.
    #[must_use]
    pub fn from_map_key(key: &str) -> Option<Self> {
        key.strip_prefix("gen")
            .and_then(|n| n.parse::<u8>().ok())
            .map(Self)
    }
}

///
/// InputKind
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Text,
    Number,
    Date,
    Time,
    Checkbox,
    Signature,
}

impl InputKind {
    /// True for kinds whose serialized value is a boolean.
    #[must_use]
    pub const fn is_boolean(self) -> bool {
        matches!(self, Self::Checkbox)
    }
}
