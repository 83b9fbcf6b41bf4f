use serde::Serialize;
use std::{collections::BTreeMap, fmt};

///
/// ErrorTree
///
/// Collects validation issues keyed by the path of the offending node.
/// Validation is non-failing at the traversal level; all issues are gathered
/// and returned to the caller in one pass.
///

#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorTree {
    issues: BTreeMap<String, Vec<String>>,
}

impl ErrorTree {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            issues: BTreeMap::new(),
        }
    }

    /// Record an issue against a node path.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.issues.entry(path.into()).or_default().push(message.into());
    }

    /// Merge another tree into this one.
    pub fn merge(&mut self, other: Self) {
        for (path, mut messages) in other.issues {
            self.issues.entry(path).or_default().append(&mut messages);
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Iterate (path, message) pairs in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.issues
            .iter()
            .flat_map(|(path, messages)| messages.iter().map(move |m| (path.as_str(), m.as_str())))
    }

    pub fn result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{path}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}

/// Record a formatted issue against a node path.
#[macro_export]
macro_rules! err {
    ($errs:expr, $path:expr, $($arg:tt)*) => {
        $errs.add($path, format!($($arg)*))
    };
}
