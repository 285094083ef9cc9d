//! Named lock file sets

use lockcheck_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Ordered set of lock file names
///
/// The same names are resolved against the canonical requirements directory
/// and against the scratch directory, and reports follow this order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LockFileSet {
    names: Vec<String>,
}

impl LockFileSet {
    /// Build a lock set, validating every name
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty, a name is empty, contains a path
    /// separator, is a relative component, or appears twice.
    pub fn new<I, S>(names: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut validated: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if let Some(reason) = invalid_reason(&name) {
                return Err(ConfigError::InvalidLockName {
                    name,
                    reason: reason.to_string(),
                });
            }
            if validated.contains(&name) {
                return Err(ConfigError::InvalidLockName {
                    name,
                    reason: "listed more than once".to_string(),
                });
            }
            validated.push(name);
        }

        if validated.is_empty() {
            return Err(ConfigError::NoLockFiles);
        }

        Ok(Self { names: validated })
    }

    /// Lock names in configured order
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve every name against a directory, preserving order
    #[must_use]
    pub fn paths_in(&self, dir: &Path) -> Vec<PathBuf> {
        self.names.iter().map(|name| dir.join(name)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

fn invalid_reason(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("name is empty")
    } else if name.contains('/') || name.contains('\\') {
        Some("name must not contain a path separator")
    } else if name == "." || name == ".." {
        Some("name must be a file name")
    } else {
        None
    }
}

impl TryFrom<Vec<String>> for LockFileSet {
    type Error = ConfigError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<LockFileSet> for Vec<String> {
    fn from(set: LockFileSet) -> Self {
        set.names
    }
}

impl fmt::Display for LockFileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.names.join(", "))
    }
}
