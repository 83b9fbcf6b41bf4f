use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

///
/// PathError
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("key path '{0}' has no segments")]
    Empty(String),
}

///
/// KeyPath
///
/// A location inside a nested entry mapping, written as dot-separated
/// segments with optional bracket indices (`gen1.oil_pressure_kpa`,
/// `group1.kw[0]`). Brackets are stripped on parse; dots and open brackets
/// are separators and empty segments are discarded. A path always has at
/// least one segment.
///
/// Display re-serializes to the dotted canonical form, so parse/display is
/// bijective over the dotted namespace used by persisted entries.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyPath {
    segments: Vec<String>,
}

impl KeyPath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let segments: Vec<String> = raw
            .replace(']', "")
            .split(['.', '['])
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();

        if segments.is_empty() {
            return Err(PathError::Empty(raw.to_string()));
        }

        Ok(Self { segments })
    }

    /// Build a path from pre-split segments; empty segments are discarded.
    pub fn from_segments<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments
            .into_iter()
            .map(Into::into)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            return Err(PathError::Empty(String::new()));
        }

        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn head(&self) -> &str {
        &self.segments[0]
    }

    #[must_use]
    pub fn leaf(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        // Parse guarantees at least one segment.
        false
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for KeyPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> Self {
        path.to_string()
    }
}
