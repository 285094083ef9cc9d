//! In-memory cache store for tests and dry runs

use crate::{CacheRecord, CacheStore};
use async_trait::async_trait;
use lockcheck_errors::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Cache kept in process memory
#[derive(Debug, Default)]
pub struct MemoryCache {
    record: Mutex<Option<CacheRecord>>,
    saves: AtomicUsize,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing history
    #[must_use]
    pub fn with_record(record: CacheRecord) -> Self {
        Self {
            record: Mutex::new(Some(record)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Current history, `None` before initialization
    #[must_use]
    pub fn snapshot(&self) -> Option<CacheRecord> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of completed saves
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn ensure_initialized(&self) -> Result<(), Error> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert_with(CacheRecord::new);
        Ok(())
    }

    async fn load(&self) -> Result<CacheRecord, Error> {
        let mut guard = self.record.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.get_or_insert_with(CacheRecord::new).clone())
    }

    async fn save(&self, record: CacheRecord) -> Result<(), Error> {
        *self.record.lock().unwrap_or_else(PoisonError::into_inner) = Some(record.bounded());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
