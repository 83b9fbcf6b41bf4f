#[cfg(test)]
mod tests;

use derive_more::From;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Value
///
/// The typed entry tree: a tagged union of the scalar kinds an input can
/// produce plus nested maps. The untagged serde representation keeps the
/// wire shape of persisted entries identical to the historical JSON form
/// (strings, numbers, booleans, objects).
///
/// Array-like levels (hourly columns, warning lists) are flattened maps
/// keyed by their index segment, matching the codec's bracket-segment
/// handling; there is no list variant.
///

#[derive(Clone, Debug, From, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Text(String),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Fresh empty map, the root of every new entry.
    #[must_use]
    pub const fn map() -> Self {
        Self::Map(BTreeMap::new())
    }

    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !self.is_map()
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self { Some(*b) } else { None }
    }

    #[must_use]
    pub const fn as_text(&self) -> Option<&str> {
        if let Self::Text(s) = self { Some(s.as_str()) } else { None }
    }

    #[must_use]
    pub const fn as_map(&self) -> Option<&BTreeMap<String, Self>> {
        if let Self::Map(m) = self { Some(m) } else { None }
    }

    #[must_use]
    pub const fn as_map_mut(&mut self) -> Option<&mut BTreeMap<String, Self>> {
        if let Self::Map(m) = self { Some(m) } else { None }
    }

    /// Numeric view: numbers pass through, numeric text parses, anything
    /// else (including empty text) is absent.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse::<f64>().ok()
                }
            }
            _ => None,
        }
    }

    /// True for the values a blank input serializes to.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Map(m) => m.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}
