//! JSON file backed cache store

use crate::{CacheRecord, CacheStore};
use async_trait::async_trait;
use lockcheck_errors::{Error, StorageError};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Cache persisted as a JSON array of hex fingerprints
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn exists(&self) -> Result<bool, Error> {
        fs::try_exists(&self.path)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, &self.path).into())
    }

    /// Write `contents` next to the cache file, then rename it into place
    async fn write_atomic(&self, contents: &[u8]) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::from_io_with_path(&e, parent))?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = write_synced(&temp_path, contents).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(StorageError::AtomicRenameFailed {
                message: format!(
                    "{} -> {}: {e}",
                    temp_path.display(),
                    self.path.display()
                ),
            }
            .into());
        }

        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(format!(".{}.tmp", std::process::id()));
        self.path.with_file_name(name)
    }
}

async fn write_synced(path: &Path, contents: &[u8]) -> Result<(), Error> {
    let io_err = |e: std::io::Error| StorageError::from_io_with_path(&e, path);

    let mut file = fs::File::create(path).await.map_err(io_err)?;
    file.write_all(contents).await.map_err(io_err)?;
    file.flush().await.map_err(io_err)?;
    file.sync_all().await.map_err(io_err)?;
    Ok(())
}

#[async_trait]
impl CacheStore for JsonFileCache {
    async fn ensure_initialized(&self) -> Result<(), Error> {
        if !self.exists().await? {
            tracing::debug!(path = %self.path.display(), "creating empty hash cache");
            self.write_atomic(b"[]").await?;
        }
        Ok(())
    }

    async fn load(&self) -> Result<CacheRecord, Error> {
        self.ensure_initialized().await?;

        let contents = fs::read(&self.path)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, &self.path))?;
        serde_json::from_slice(&contents).map_err(|e| {
            StorageError::CorruptedData {
                message: format!("{}: {e}", self.path.display()),
            }
            .into()
        })
    }

    async fn save(&self, record: CacheRecord) -> Result<(), Error> {
        let record = record.bounded();
        let json = serde_json::to_vec(&record)?;
        self.write_atomic(&json).await?;
        tracing::debug!(
            path = %self.path.display(),
            entries = record.len(),
            "saved hash cache"
        );
        Ok(())
    }
}
