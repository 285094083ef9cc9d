#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! SHA-1 fingerprints over ordered file sets
//!
//! A [`Fingerprint`] identifies the exact contents of a list of files. It is
//! used as the key of the verification skip cache, so equal inputs must always
//! produce equal fingerprints. Ordering is the caller's job: the hasher reads
//! the files in exactly the order it is given.

use lockcheck_errors::{Error, StorageError};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;

/// Size of chunks for streaming hash computation
const CHUNK_SIZE: usize = 64 * 1024; // 64KB

/// Length of a SHA-1 digest in bytes
pub const FINGERPRINT_LEN: usize = 20;

/// A SHA-1 digest over the contents of an ordered file set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bytes: [u8; FINGERPRINT_LEN],
}

impl Fingerprint {
    /// Create a fingerprint from raw bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; FINGERPRINT_LEN] {
        &self.bytes
    }

    /// Convert to hex string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parse from hex string
    ///
    /// # Errors
    /// Returns an error if the input is not valid hexadecimal or does not decode to exactly 20 bytes.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        let bytes = hex::decode(s).map_err(|e| StorageError::CorruptedData {
            message: format!("invalid fingerprint hex {s:?}: {e}"),
        })?;

        let bytes: [u8; FINGERPRINT_LEN] =
            bytes
                .try_into()
                .map_err(|bytes: Vec<u8>| StorageError::CorruptedData {
                    message: format!(
                        "fingerprint must be {FINGERPRINT_LEN} bytes, got {}",
                        bytes.len()
                    ),
                })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Compute the fingerprint of a byte slice
    #[must_use]
    pub fn from_data(data: &[u8]) -> Self {
        let mut hasher = FingerprintHasher::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Compute the fingerprint of files read in the given order
    ///
    /// The contents are concatenated with no separator. The list is not
    /// sorted here.
    ///
    /// # Errors
    /// Returns an error naming the path if any file cannot be opened or read.
    pub async fn of_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self, Error> {
        let mut hasher = FingerprintHasher::new();
        for path in paths {
            hasher.update_file(path.as_ref()).await?;
        }
        let fingerprint = hasher.finalize();
        tracing::debug!(
            files = paths.len(),
            fingerprint = %fingerprint,
            "computed input fingerprint"
        );
        Ok(fingerprint)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Incremental fingerprint computation
#[derive(Debug, Default, Clone)]
pub struct FingerprintHasher {
    inner: Sha1,
}

impl FingerprintHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold raw bytes into the digest
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Fold the full contents of a file into the digest
    ///
    /// # Errors
    /// Returns an error naming the path if the file cannot be opened or read.
    /// The hasher should be discarded after an error.
    pub async fn update_file(&mut self, path: &Path) -> Result<(), Error> {
        let mut file = File::open(path)
            .await
            .map_err(|e| StorageError::from_io_with_path(&e, path))?;
        let mut buffer = vec![0; CHUNK_SIZE];

        loop {
            let n = file
                .read(&mut buffer)
                .await
                .map_err(|e| StorageError::from_io_with_path(&e, path))?;
            if n == 0 {
                break;
            }
            self.inner.update(&buffer[..n]);
        }

        Ok(())
    }

    /// Finish the digest
    #[must_use]
    pub fn finalize(self) -> Fingerprint {
        let digest = self.inner.finalize();
        let mut bytes = [0u8; FINGERPRINT_LEN];
        bytes.copy_from_slice(&digest);
        Fingerprint::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fingerprint_basics() {
        let fingerprint = Fingerprint::from_data(b"hello world");

        // Known SHA-1 of "hello world"
        assert_eq!(
            fingerprint.to_hex(),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
        assert_eq!(fingerprint.to_string().len(), 2 * FINGERPRINT_LEN);
    }

    #[test]
    fn test_fingerprint_serialization() {
        let fingerprint = Fingerprint::from_data(b"test");
        let json = serde_json::to_string(&fingerprint).unwrap();
        assert_eq!(json, format!("\"{}\"", fingerprint.to_hex()));
        let deserialized: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fingerprint, deserialized);
    }

    #[tokio::test]
    async fn test_files_are_concatenated_in_order() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.in");
        let b = dir.path().join("b.txt");
        tokio::fs::write(&a, b"abc").await.unwrap();
        tokio::fs::write(&b, b"def").await.unwrap();

        let forward = Fingerprint::of_files(&[&a, &b]).await.unwrap();
        assert_eq!(forward, Fingerprint::from_data(b"abcdef"));

        let reversed = Fingerprint::of_files(&[&b, &a]).await.unwrap();
        assert_eq!(reversed, Fingerprint::from_data(b"defabc"));
        assert_ne!(forward, reversed);
    }

    #[tokio::test]
    async fn test_empty_file_list() {
        let none: [&Path; 0] = [];
        let fingerprint = Fingerprint::of_files(&none).await.unwrap();
        assert_eq!(
            fingerprint.to_hex(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[tokio::test]
    async fn test_large_file_streams_across_chunks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("big.txt");
        let data = vec![b'x'; CHUNK_SIZE * 2 + 17];
        tokio::fs::write(&path, &data).await.unwrap();

        let fingerprint = Fingerprint::of_files(&[&path]).await.unwrap();
        assert_eq!(fingerprint, Fingerprint::from_data(&data));
    }
}
