//! Bounded fingerprint history

use lockcheck_hash::Fingerprint;
use serde::{Deserialize, Serialize};

/// Maximum number of fingerprints kept
pub const CACHE_CAPACITY: usize = 100;

/// Ordered history of known-good fingerprints, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheRecord {
    entries: Vec<Fingerprint>,
}

impl CacheRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_entries(entries: Vec<Fingerprint>) -> Self {
        Self { entries }
    }

    /// Linear membership test
    #[must_use]
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.iter().any(|entry| entry == fingerprint)
    }

    /// Record `fingerprint` as the newest entry without duplicating it
    ///
    /// An existing copy is moved to the end instead of being appended again.
    /// The record may exceed [`CACHE_CAPACITY`] until it is bounded.
    pub fn promote(&mut self, fingerprint: Fingerprint) {
        self.entries.retain(|entry| *entry != fingerprint);
        self.entries.push(fingerprint);
    }

    /// Keep only the newest [`CACHE_CAPACITY`] entries, preserving order
    #[must_use]
    pub fn bounded(mut self) -> Self {
        if self.entries.len() > CACHE_CAPACITY {
            let excess = self.entries.len() - CACHE_CAPACITY;
            self.entries.drain(..excess);
        }
        self
    }

    #[must_use]
    pub fn latest(&self) -> Option<&Fingerprint> {
        self.entries.last()
    }

    #[must_use]
    pub fn entries(&self) -> &[Fingerprint] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
