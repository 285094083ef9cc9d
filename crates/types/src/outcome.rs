//! Verification outcome types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A lock file whose regenerated content differs from the checked-in copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Lock file name
    pub name: String,
    /// Checked-in lock file
    pub expected: PathBuf,
    /// Freshly regenerated lock file
    pub actual: PathBuf,
}

/// Result of comparing regenerated lock files with the checked-in ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "mismatches", rename_all = "lowercase")]
pub enum VerificationOutcome {
    /// Every lock file is byte-identical
    Consistent,
    /// At least one lock file differs, in lock set order
    Inconsistent(Vec<Mismatch>),
}

impl VerificationOutcome {
    /// Build an outcome from the collected mismatches
    #[must_use]
    pub fn from_mismatches(mismatches: Vec<Mismatch>) -> Self {
        if mismatches.is_empty() {
            Self::Consistent
        } else {
            Self::Inconsistent(mismatches)
        }
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        matches!(self, Self::Consistent)
    }

    #[must_use]
    pub fn mismatches(&self) -> &[Mismatch] {
        match self {
            Self::Consistent => &[],
            Self::Inconsistent(mismatches) => mismatches,
        }
    }

    /// Names of the mismatched lock files
    #[must_use]
    pub fn mismatched_names(&self) -> Vec<String> {
        self.mismatches().iter().map(|m| m.name.clone()).collect()
    }
}
