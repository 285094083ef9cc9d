#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Skip cache of known-good input fingerprints
//!
//! Every verification that reaches the compare step records the fingerprint
//! of the regenerated inputs. A later run whose inputs hash to a recorded
//! fingerprint skips regeneration entirely.
//!
//! The history is bounded to [`CACHE_CAPACITY`] entries with the oldest
//! evicted first. Writers are not synchronized with each other; two runs
//! sharing a cache file may lose an update.

mod file;
mod memory;
mod record;

pub use file::JsonFileCache;
pub use memory::MemoryCache;
pub use record::{CacheRecord, CACHE_CAPACITY};

use async_trait::async_trait;
use lockcheck_errors::Error;
use lockcheck_hash::Fingerprint;

/// Persistent storage for the fingerprint history
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Create an empty persisted store if none exists yet
    async fn ensure_initialized(&self) -> Result<(), Error>;

    /// Load the stored history, oldest first
    ///
    /// A store that does not exist yet is created empty.
    async fn load(&self) -> Result<CacheRecord, Error>;

    /// Persist the last [`CACHE_CAPACITY`] entries of `record`
    async fn save(&self, record: CacheRecord) -> Result<(), Error>;

    /// Whether `fingerprint` is in the stored history
    async fn contains(&self, fingerprint: &Fingerprint) -> Result<bool, Error> {
        Ok(self.load().await?.contains(fingerprint))
    }
}
